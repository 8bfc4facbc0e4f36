//! Contracts for the external platforms and the sync service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::woo::{NewWooOrder, WooOrder, WooProduct, WooSubscription};
use backoffice_core::customers::AccountingContact;
use backoffice_core::errors::Result;
use backoffice_core::jobs::TaskOutcome;
use backoffice_core::products::StockStatus;
use backoffice_core::subscriptions::RenewalPlan;

/// The e-commerce platform (WooCommerce REST API).
#[async_trait]
pub trait EcommerceApiClient: Send + Sync {
    /// Fetch orders, optionally only those modified after `modified_after`
    async fn fetch_orders(&self, modified_after: Option<DateTime<Utc>>) -> Result<Vec<WooOrder>>;

    async fn fetch_subscriptions(&self) -> Result<Vec<WooSubscription>>;

    async fn fetch_products(&self) -> Result<Vec<WooProduct>>;

    /// Create an order and return it as the platform stored it
    async fn create_order(&self, order: &NewWooOrder) -> Result<WooOrder>;

    async fn update_stock_status(&self, woo_product_id: i64, stock_status: StockStatus)
        -> Result<()>;
}

/// The accounting platform.
#[async_trait]
pub trait AccountingApiClient: Send + Sync {
    /// Contact registered with `email`, if any
    async fn find_contact_by_email(&self, email: &str) -> Result<Option<AccountingContact>>;
}

/// Sync tasks exposed to the server. Every task method records one job
/// result and only fails when that record cannot be written.
#[async_trait]
pub trait SyncServiceTrait: Send + Sync {
    async fn import_orders(&self, full: bool) -> Result<TaskOutcome>;

    async fn import_subscriptions(&self) -> Result<TaskOutcome>;

    async fn import_gift_subscriptions(&self) -> Result<TaskOutcome>;

    async fn import_products(&self) -> Result<TaskOutcome>;

    async fn create_renewal_orders(&self, ignore_renewal_day: bool) -> Result<TaskOutcome>;

    async fn update_stock_status(&self) -> Result<TaskOutcome>;

    async fn cleanup_products(&self) -> Result<TaskOutcome>;

    async fn cleanup_customers(&self) -> Result<TaskOutcome>;

    /// Renewal plan for today without side effects
    fn preview_renewals(&self, ignore_renewal_day: bool) -> Result<RenewalPlan>;

    /// Look the customer up at the accounting platform and store the contact id
    async fn lookup_accounting_contact(&self, customer_id: &str)
        -> Result<Option<AccountingContact>>;
}
