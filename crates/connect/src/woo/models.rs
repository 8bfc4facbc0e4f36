//! Wire types for the WooCommerce REST API (v3).
//!
//! Only the fields the backoffice reads are modelled. Unknown fields are
//! ignored and most fields default, since the API omits them freely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WooMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WooBilling {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WooLineItem {
    pub id: i64,
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub meta_data: Vec<WooMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WooOrder {
    pub id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub date_created_gmt: Option<String>,
    #[serde(default)]
    pub billing: WooBilling,
    #[serde(default)]
    pub line_items: Vec<WooLineItem>,
    #[serde(default)]
    pub meta_data: Vec<WooMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WooSubscription {
    pub id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub customer_id: i64,
    /// `day`, `week`, `month` or `year`
    #[serde(default)]
    pub billing_period: String,
    /// Sent as a string by the API, occasionally as a number
    #[serde(default)]
    pub billing_interval: Value,
    #[serde(default)]
    pub start_date_gmt: Option<String>,
    #[serde(default)]
    pub next_payment_date_gmt: Option<String>,
    #[serde(default)]
    pub billing: WooBilling,
    #[serde(default)]
    pub line_items: Vec<WooLineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WooCategory {
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WooAttribute {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WooProduct {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub stock_status: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub categories: Vec<WooCategory>,
    #[serde(default)]
    pub attributes: Vec<WooAttribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWooLineItem {
    pub product_id: i64,
    pub quantity: i32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWooOrder {
    pub customer_id: i64,
    pub status: String,
    pub set_paid: bool,
    pub billing: WooBilling,
    pub line_items: Vec<NewWooLineItem>,
    pub meta_data: Vec<WooMeta>,
}

/// Body of `PUT /products/{id}` for stock updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct StockStatusUpdate<'a> {
    pub stock_status: &'a str,
}

impl WooMeta {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: None,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Meta value by key, rendered as text.
pub fn meta_text(meta: &[WooMeta], key: &str) -> Option<String> {
    meta.iter()
        .find(|m| m.key == key)
        .and_then(|m| match &m.value {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
}
