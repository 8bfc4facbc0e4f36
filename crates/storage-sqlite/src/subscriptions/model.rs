//! Database model for subscriptions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use backoffice_core::subscriptions::Subscription;
use backoffice_core::utils::{enum_from_text, enum_to_text};

use crate::utils::stored;

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::subscriptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct SubscriptionDB {
    pub id: String,
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub woo_subscription_id: Option<i64>,
    pub gift_order_line_id: Option<i64>,
    pub kind: String,
    pub status: String,
    pub frequency: String,
    pub quantity: i32,
    pub renewal_day: i32,
    pub gift_recipient_name: Option<String>,
    pub gift_recipient_email: Option<String>,
    pub gift_duration_months: Option<i32>,
    pub gift_first_delivery: Option<NaiveDate>,
    pub last_renewal_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<SubscriptionDB> for Subscription {
    fn from(db: SubscriptionDB) -> Self {
        Self {
            id: db.id,
            customer_id: db.customer_id,
            product_id: db.product_id,
            woo_subscription_id: db.woo_subscription_id,
            gift_order_line_id: db.gift_order_line_id,
            kind: stored(&db.kind, "subscriptions.kind", enum_from_text),
            status: stored(&db.status, "subscriptions.status", enum_from_text),
            frequency: stored(&db.frequency, "subscriptions.frequency", enum_from_text),
            quantity: db.quantity,
            renewal_day: db.renewal_day,
            gift_recipient_name: db.gift_recipient_name,
            gift_recipient_email: db.gift_recipient_email,
            gift_duration_months: db.gift_duration_months,
            gift_first_delivery: db.gift_first_delivery,
            last_renewal_at: db.last_renewal_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Subscription> for SubscriptionDB {
    fn from(domain: Subscription) -> Self {
        Self {
            id: domain.id,
            customer_id: domain.customer_id,
            product_id: domain.product_id,
            woo_subscription_id: domain.woo_subscription_id,
            gift_order_line_id: domain.gift_order_line_id,
            kind: enum_to_text(&domain.kind),
            status: enum_to_text(&domain.status),
            frequency: enum_to_text(&domain.frequency),
            quantity: domain.quantity,
            renewal_day: domain.renewal_day,
            gift_recipient_name: domain.gift_recipient_name,
            gift_recipient_email: domain.gift_recipient_email,
            gift_duration_months: domain.gift_duration_months,
            gift_first_delivery: domain.gift_first_delivery,
            last_renewal_at: domain.last_renewal_at,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

crate::sqlite_entity!(Subscription, SubscriptionDB, subscriptions);
