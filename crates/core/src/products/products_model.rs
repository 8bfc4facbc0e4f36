use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::repository::Entity;

/// Kind of product sold in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Coffee,
    Gift,
    Other,
}

/// Publication status, following the e-commerce platform plus a local `Deleted`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Publish,
    #[default]
    Draft,
    Pending,
    Private,
    /// Removed from the catalog; kept locally until cleanup
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub woo_product_id: Option<i64>,
    pub name: String,
    pub sku: Option<String>,
    pub product_type: ProductType,
    pub status: ProductStatus,
    pub stock_status: StockStatus,
    pub price: Decimal,
    /// Country of origin for coffees
    pub country: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn new(name: impl Into<String>, product_type: ProductType, price: Decimal) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            woo_product_id: None,
            name: name.into(),
            sku: None,
            product_type,
            status: ProductStatus::Draft,
            stock_status: StockStatus::InStock,
            price,
            country: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.status == ProductStatus::Deleted
    }
}

impl Entity for Product {
    const NAME: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }
}
