//! Database model for orders.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use backoffice_core::orders::Order;
use backoffice_core::utils::{enum_from_text, enum_to_text, try_parse_amount};

use crate::utils::stored;

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct OrderDB {
    pub id: String,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub woo_order_id: Option<i64>,
    pub order_type: String,
    pub status: String,
    pub total: String,
    pub currency: String,
    pub woo_created_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<OrderDB> for Order {
    fn from(db: OrderDB) -> Self {
        Self {
            id: db.id,
            customer_id: db.customer_id,
            subscription_id: db.subscription_id,
            woo_order_id: db.woo_order_id,
            order_type: stored(&db.order_type, "orders.order_type", enum_from_text),
            status: stored(&db.status, "orders.status", enum_from_text),
            total: stored(&db.total, "orders.total", try_parse_amount),
            currency: db.currency,
            woo_created_at: db.woo_created_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Order> for OrderDB {
    fn from(domain: Order) -> Self {
        Self {
            id: domain.id,
            customer_id: domain.customer_id,
            subscription_id: domain.subscription_id,
            woo_order_id: domain.woo_order_id,
            order_type: enum_to_text(&domain.order_type),
            status: enum_to_text(&domain.status),
            total: domain.total.to_string(),
            currency: domain.currency,
            woo_created_at: domain.woo_created_at,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

crate::sqlite_entity!(Order, OrderDB, orders);
