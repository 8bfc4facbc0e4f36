//! Read-only projections of business rows into the tables shown by the backoffice pages.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::customers::Customer;
use crate::orders::{Order, OrderStatus, OrderType};
use crate::products::{Product, ProductStatus, ProductType, StockStatus};
use crate::subscriptions::{
    Subscription, SubscriptionFrequency, SubscriptionKind, SubscriptionStatus,
};

fn names_by_id(customers: &[Customer]) -> HashMap<&str, String> {
    customers
        .iter()
        .map(|c| (c.id.as_str(), c.full_name()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    pub woo_order_id: Option<i64>,
    pub customer_name: Option<String>,
    pub subscription_id: Option<String>,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub total: Decimal,
    pub currency: String,
    pub placed_at: NaiveDateTime,
}

/// Orders newest first, with the customer's name resolved.
pub fn order_rows(orders: Vec<Order>, customers: &[Customer]) -> Vec<OrderRow> {
    let names = names_by_id(customers);
    let mut rows: Vec<OrderRow> = orders
        .into_iter()
        .map(|o| OrderRow {
            placed_at: o.placed_at(),
            customer_name: o
                .customer_id
                .as_deref()
                .and_then(|id| names.get(id).cloned()),
            id: o.id,
            woo_order_id: o.woo_order_id,
            subscription_id: o.subscription_id,
            order_type: o.order_type,
            status: o.status,
            total: o.total,
            currency: o.currency,
        })
        .collect();
    rows.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRow {
    pub id: String,
    pub customer_name: Option<String>,
    /// Gift recipient, when the subscription is a gift
    pub recipient: Option<String>,
    pub kind: SubscriptionKind,
    pub status: SubscriptionStatus,
    pub frequency: SubscriptionFrequency,
    pub quantity: i32,
    pub renewal_day: i32,
    pub last_renewal_at: Option<NaiveDateTime>,
}

/// Active subscriptions first, then newest first.
pub fn subscription_rows(
    subscriptions: Vec<Subscription>,
    customers: &[Customer],
) -> Vec<SubscriptionRow> {
    let names = names_by_id(customers);
    let mut subscriptions = subscriptions;
    subscriptions.sort_by(|a, b| {
        b.is_active()
            .cmp(&a.is_active())
            .then(b.created_at.cmp(&a.created_at))
    });
    subscriptions
        .into_iter()
        .map(|s| SubscriptionRow {
            customer_name: s
                .customer_id
                .as_deref()
                .and_then(|id| names.get(id).cloned()),
            recipient: s.gift_recipient_name.or(s.gift_recipient_email),
            id: s.id,
            kind: s.kind,
            status: s.status,
            frequency: s.frequency,
            quantity: s.quantity,
            renewal_day: s.renewal_day,
            last_renewal_at: s.last_renewal_at,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: String,
    pub woo_product_id: Option<i64>,
    pub name: String,
    pub sku: Option<String>,
    pub product_type: ProductType,
    pub status: ProductStatus,
    pub stock_status: StockStatus,
    pub price: Decimal,
    pub country: Option<String>,
}

/// Products by name, deleted products excluded unless asked for.
pub fn product_rows(products: Vec<Product>, include_deleted: bool) -> Vec<ProductRow> {
    let mut rows: Vec<ProductRow> = products
        .into_iter()
        .filter(|p| include_deleted || !p.is_deleted())
        .map(|p| ProductRow {
            id: p.id,
            woo_product_id: p.woo_product_id,
            name: p.name,
            sku: p.sku,
            product_type: p.product_type,
            status: p.status,
            stock_status: p.stock_status,
            price: p.price,
            country: p.country,
        })
        .collect();
    rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub order_count: usize,
    pub active_subscriptions: usize,
    pub accounting_contact_id: Option<i64>,
}

/// Customers by name with order and subscription counts.
pub fn customer_rows(
    customers: Vec<Customer>,
    orders: &[Order],
    subscriptions: &[Subscription],
) -> Vec<CustomerRow> {
    let mut order_counts: HashMap<&str, usize> = HashMap::new();
    for customer_id in orders.iter().filter_map(|o| o.customer_id.as_deref()) {
        *order_counts.entry(customer_id).or_default() += 1;
    }
    let mut subscription_counts: HashMap<&str, usize> = HashMap::new();
    for customer_id in subscriptions
        .iter()
        .filter(|s| s.is_active())
        .filter_map(|s| s.customer_id.as_deref())
    {
        *subscription_counts.entry(customer_id).or_default() += 1;
    }

    let mut rows: Vec<CustomerRow> = customers
        .into_iter()
        .map(|c| CustomerRow {
            name: c.full_name(),
            order_count: order_counts.get(c.id.as_str()).copied().unwrap_or(0),
            active_subscriptions: subscription_counts
                .get(c.id.as_str())
                .copied()
                .unwrap_or(0),
            id: c.id,
            email: c.email,
            accounting_contact_id: c.accounting_contact_id,
        })
        .collect();
    rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    rows
}
