use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CURRENCY;
use crate::repository::Entity;

/// How an order came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Generated from a subscription renewal
    Renewal,
    /// Regular one-off purchase in the shop
    #[default]
    NonRecurring,
    /// Purchase of a gift subscription
    Gift,
}

/// Order status, following the e-commerce platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub woo_order_id: Option<i64>,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub total: Decimal,
    pub currency: String,
    /// Creation time reported by the e-commerce platform
    pub woo_created_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    pub fn new(order_type: OrderType, status: OrderStatus, total: Decimal) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            customer_id: None,
            subscription_id: None,
            woo_order_id: None,
            order_type,
            status,
            total,
            currency: DEFAULT_CURRENCY.to_string(),
            woo_created_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Time the order was placed, preferring the platform's own timestamp.
    pub fn placed_at(&self) -> NaiveDateTime {
        self.woo_created_at.unwrap_or(self.created_at)
    }
}

impl Entity for Order {
    const NAME: &'static str = "order";

    fn id(&self) -> &str {
        &self.id
    }
}
