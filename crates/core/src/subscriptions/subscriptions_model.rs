use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionKind {
    /// Paid by the customer on a recurring schedule
    #[default]
    Private,
    /// Prepaid for a fixed number of months as a gift
    Gift,
    /// Business customer
    B2b,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionStatus {
    Active,
    OnHold,
    Cancelled,
    Expired,
    #[default]
    Pending,
    PendingCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionFrequency {
    #[default]
    Monthly,
    Fortnightly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub customer_id: Option<String>,
    /// Product shipped on each renewal
    pub product_id: Option<String>,
    pub woo_subscription_id: Option<i64>,
    /// Order line item a gift subscription was bought with
    pub gift_order_line_id: Option<i64>,
    pub kind: SubscriptionKind,
    pub status: SubscriptionStatus,
    pub frequency: SubscriptionFrequency,
    pub quantity: i32,
    /// Day of month (1..=28) renewals are generated on
    pub renewal_day: i32,
    pub gift_recipient_name: Option<String>,
    pub gift_recipient_email: Option<String>,
    pub gift_duration_months: Option<i32>,
    pub gift_first_delivery: Option<NaiveDate>,
    pub last_renewal_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Subscription {
    pub fn new(kind: SubscriptionKind, frequency: SubscriptionFrequency, quantity: i32) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            customer_id: None,
            product_id: None,
            woo_subscription_id: None,
            gift_order_line_id: None,
            kind,
            status: SubscriptionStatus::Pending,
            frequency,
            quantity,
            renewal_day: 1,
            gift_recipient_name: None,
            gift_recipient_email: None,
            gift_duration_months: None,
            gift_first_delivery: None,
            last_renewal_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

impl Entity for Subscription {
    const NAME: &'static str = "subscription";

    fn id(&self) -> &str {
        &self.id
    }
}
