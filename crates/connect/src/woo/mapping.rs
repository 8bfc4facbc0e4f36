//! Mapping of WooCommerce wire types onto domain models.
//!
//! `apply_*` functions overwrite the platform-owned fields of an existing
//! record and leave locally owned fields (ids, links, renewal stamps) alone,
//! so callers can compare before and after to detect changes.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use super::models::{meta_text, WooBilling, WooLineItem, WooOrder, WooProduct, WooSubscription};
use backoffice_core::constants::{DEFAULT_CURRENCY, GIFT_SKU_PREFIX};
use backoffice_core::customers::Customer;
use backoffice_core::orders::{Order, OrderStatus, OrderType};
use backoffice_core::products::{Product, ProductStatus, ProductType, StockStatus};
use backoffice_core::subscriptions::{
    Subscription, SubscriptionFrequency, SubscriptionKind, SubscriptionStatus, LAST_RENEWAL_DAY,
};
use backoffice_core::utils::{enum_from_text, parse_amount, parse_platform_datetime};

/// Set on orders created by the subscriptions plugin for a renewal.
pub const RENEWAL_META_KEY: &str = "_subscription_renewal";
/// Set on renewal orders pushed by the backoffice.
pub const BACKOFFICE_SUBSCRIPTION_META_KEY: &str = "_backoffice_subscription_id";

pub const GIFT_RECIPIENT_NAME_KEY: &str = "recipient_name";
pub const GIFT_RECIPIENT_EMAIL_KEY: &str = "recipient_email";
pub const GIFT_DURATION_KEY: &str = "duration_months";
pub const GIFT_FIRST_DELIVERY_KEY: &str = "first_delivery";

const COUNTRY_ATTRIBUTES: [&str; 3] = ["country", "land", "origin"];

pub fn order_status(status: &str) -> OrderStatus {
    enum_from_text(status).unwrap_or_default()
}

pub fn order_type(order: &WooOrder) -> OrderType {
    let is_renewal = order
        .meta_data
        .iter()
        .any(|m| m.key == RENEWAL_META_KEY || m.key == BACKOFFICE_SUBSCRIPTION_META_KEY);
    if is_renewal {
        OrderType::Renewal
    } else if order.line_items.iter().any(is_gift_line) {
        OrderType::Gift
    } else {
        OrderType::NonRecurring
    }
}

pub fn apply_order(target: &mut Order, woo: &WooOrder) {
    target.woo_order_id = Some(woo.id);
    target.order_type = order_type(woo);
    target.status = order_status(&woo.status);
    target.total = parse_amount(&woo.total);
    target.currency = if woo.currency.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        woo.currency.clone()
    };
    target.woo_created_at = woo
        .date_created_gmt
        .as_deref()
        .and_then(parse_platform_datetime);
}

/// Copy billing details onto a customer. Blank values never overwrite.
pub fn apply_customer(target: &mut Customer, woo_customer_id: i64, billing: &WooBilling) {
    if woo_customer_id > 0 {
        target.woo_customer_id = Some(woo_customer_id);
    }
    if !billing.email.trim().is_empty() {
        target.email = billing.email.trim().to_lowercase();
    }
    if !billing.first_name.is_empty() {
        target.first_name = billing.first_name.clone();
    }
    if !billing.last_name.is_empty() {
        target.last_name = billing.last_name.clone();
    }
    if !billing.phone.is_empty() {
        target.phone = Some(billing.phone.clone());
    }
}

pub fn subscription_status(status: &str) -> SubscriptionStatus {
    enum_from_text(status).unwrap_or_default()
}

fn interval(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(1),
        Value::String(s) => s.trim().parse().unwrap_or(1),
        _ => 1,
    }
}

/// Every two weeks is fortnightly, everything else ships monthly.
pub fn subscription_frequency(billing_period: &str, billing_interval: &Value) -> SubscriptionFrequency {
    match (billing_period, interval(billing_interval)) {
        ("week", 2) | ("day", 14) => SubscriptionFrequency::Fortnightly,
        _ => SubscriptionFrequency::Monthly,
    }
}

/// Renewal day taken from the next payment date, else the start date.
pub fn renewal_day(woo: &WooSubscription) -> Option<i32> {
    woo.next_payment_date_gmt
        .as_deref()
        .or(woo.start_date_gmt.as_deref())
        .and_then(parse_platform_datetime)
        .map(|ts| (ts.day() as i32).min(LAST_RENEWAL_DAY))
}

pub fn apply_subscription(target: &mut Subscription, woo: &WooSubscription) {
    target.woo_subscription_id = Some(woo.id);
    target.kind = if woo.billing.company.trim().is_empty() {
        SubscriptionKind::Private
    } else {
        SubscriptionKind::B2b
    };
    target.status = subscription_status(&woo.status);
    target.frequency = subscription_frequency(&woo.billing_period, &woo.billing_interval);
    target.quantity = woo
        .line_items
        .first()
        .map(|l| l.quantity.max(1))
        .unwrap_or(1);
    if let Some(day) = renewal_day(woo) {
        target.renewal_day = day;
    }
}

pub fn is_gift_line(line: &WooLineItem) -> bool {
    line.sku.to_uppercase().starts_with(GIFT_SKU_PREFIX)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GiftDetails {
    pub recipient_name: Option<String>,
    pub recipient_email: Option<String>,
    pub duration_months: Option<i32>,
    pub first_delivery: Option<NaiveDate>,
}

/// Gift details from line meta. The duration falls back to a numeric SKU
/// suffix, e.g. `GIFT-6`.
pub fn gift_details(line: &WooLineItem) -> GiftDetails {
    let meta = &line.meta_data;
    let duration_months = meta_text(meta, GIFT_DURATION_KEY)
        .and_then(|d| d.parse().ok())
        .or_else(|| {
            line.sku
                .rsplit('-')
                .next()
                .and_then(|suffix| suffix.parse().ok())
        });

    GiftDetails {
        recipient_name: meta_text(meta, GIFT_RECIPIENT_NAME_KEY),
        recipient_email: meta_text(meta, GIFT_RECIPIENT_EMAIL_KEY).map(|e| e.to_lowercase()),
        duration_months,
        first_delivery: meta_text(meta, GIFT_FIRST_DELIVERY_KEY)
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
    }
}

/// Gift subscriptions start once the purchase order is paid.
pub fn gift_status(order_status: OrderStatus) -> SubscriptionStatus {
    match order_status {
        OrderStatus::Processing | OrderStatus::Completed => SubscriptionStatus::Active,
        OrderStatus::Cancelled | OrderStatus::Refunded | OrderStatus::Failed => {
            SubscriptionStatus::Cancelled
        }
        OrderStatus::Pending | OrderStatus::OnHold => SubscriptionStatus::Pending,
    }
}

pub fn product_type(woo: &WooProduct) -> ProductType {
    if woo.sku.to_uppercase().starts_with(GIFT_SKU_PREFIX) {
        ProductType::Gift
    } else if woo.categories.iter().any(|c| c.slug.contains("coffee") || c.slug.contains("kaffe")) {
        ProductType::Coffee
    } else {
        ProductType::Other
    }
}

pub fn product_status(status: &str) -> ProductStatus {
    match status {
        "trash" => ProductStatus::Deleted,
        other => enum_from_text(other).unwrap_or_default(),
    }
}

pub fn stock_status(status: &str) -> StockStatus {
    enum_from_text(status).unwrap_or_default()
}

pub fn apply_product(target: &mut Product, woo: &WooProduct) {
    target.woo_product_id = Some(woo.id);
    target.name = woo.name.clone();
    target.sku = Some(woo.sku.clone()).filter(|s| !s.is_empty());
    target.product_type = product_type(woo);
    target.status = product_status(&woo.status);
    target.stock_status = stock_status(&woo.stock_status);
    target.price = parse_amount(&woo.price);
    target.country = woo
        .attributes
        .iter()
        .find(|a| COUNTRY_ATTRIBUTES.contains(&a.name.to_lowercase().as_str()))
        .and_then(|a| a.options.first().cloned());
}
