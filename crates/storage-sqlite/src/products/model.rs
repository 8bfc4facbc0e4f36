//! Database model for products.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use backoffice_core::products::Product;
use backoffice_core::utils::{enum_from_text, enum_to_text, try_parse_amount};

use crate::utils::stored;

/// Enums are stored as their serde text form, the price as decimal text.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ProductDB {
    pub id: String,
    pub woo_product_id: Option<i64>,
    pub name: String,
    pub sku: Option<String>,
    pub product_type: String,
    pub status: String,
    pub stock_status: String,
    pub price: String,
    pub country: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ProductDB> for Product {
    fn from(db: ProductDB) -> Self {
        Self {
            id: db.id,
            woo_product_id: db.woo_product_id,
            name: db.name,
            sku: db.sku,
            product_type: stored(&db.product_type, "products.product_type", enum_from_text),
            status: stored(&db.status, "products.status", enum_from_text),
            stock_status: stored(&db.stock_status, "products.stock_status", enum_from_text),
            price: stored(&db.price, "products.price", try_parse_amount),
            country: db.country,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Product> for ProductDB {
    fn from(domain: Product) -> Self {
        Self {
            id: domain.id,
            woo_product_id: domain.woo_product_id,
            name: domain.name,
            sku: domain.sku,
            product_type: enum_to_text(&domain.product_type),
            status: enum_to_text(&domain.status),
            stock_status: enum_to_text(&domain.stock_status),
            price: domain.price.to_string(),
            country: domain.country,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

crate::sqlite_entity!(Product, ProductDB, products);
