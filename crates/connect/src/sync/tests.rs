//! Sync task tests against a temporary database and fake platform clients.

use super::*;
use crate::traits::{AccountingApiClient, EcommerceApiClient, SyncServiceTrait};
use crate::woo::{
    NewWooOrder, WooBilling, WooLineItem, WooMeta, WooOrder, WooProduct, WooSubscription,
};
use async_trait::async_trait;
use backoffice_core::constants::{TASK_IMPORT_ORDERS, TASK_IMPORT_PRODUCTS};
use backoffice_core::customers::{AccountingContact, Customer};
use backoffice_core::errors::{Error, Result};
use backoffice_core::jobs::{JobResultService, JobResultServiceTrait, TaskOutcome};
use backoffice_core::orders::{Order, OrderStatus, OrderType};
use backoffice_core::products::{Product, ProductStatus, ProductType, StockStatus};
use backoffice_core::subscriptions::{
    Subscription, SubscriptionFrequency, SubscriptionKind, SubscriptionStatus,
};
use backoffice_storage_sqlite::RepositoryRegistry;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct FakeWoo {
    orders: Vec<WooOrder>,
    subscriptions: Vec<WooSubscription>,
    products: Vec<WooProduct>,
    fail_with: Option<String>,
    order_queries: Mutex<Vec<Option<DateTime<Utc>>>>,
    created_orders: Mutex<Vec<NewWooOrder>>,
    stock_updates: Mutex<Vec<(i64, StockStatus)>>,
}

impl FakeWoo {
    fn check(&self) -> Result<()> {
        match &self.fail_with {
            Some(message) => Err(Error::external(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EcommerceApiClient for FakeWoo {
    async fn fetch_orders(&self, modified_after: Option<DateTime<Utc>>) -> Result<Vec<WooOrder>> {
        self.order_queries.lock().unwrap().push(modified_after);
        self.check()?;
        Ok(self.orders.clone())
    }

    async fn fetch_subscriptions(&self) -> Result<Vec<WooSubscription>> {
        self.check()?;
        Ok(self.subscriptions.clone())
    }

    async fn fetch_products(&self) -> Result<Vec<WooProduct>> {
        self.check()?;
        Ok(self.products.clone())
    }

    async fn create_order(&self, order: &NewWooOrder) -> Result<WooOrder> {
        self.check()?;
        let mut created = self.created_orders.lock().unwrap();
        created.push(order.clone());
        Ok(WooOrder {
            id: 9000 + created.len() as i64,
            status: "processing".to_string(),
            currency: "NOK".to_string(),
            total: "199.00".to_string(),
            customer_id: order.customer_id,
            billing: order.billing.clone(),
            meta_data: order.meta_data.clone(),
            ..Default::default()
        })
    }

    async fn update_stock_status(
        &self,
        woo_product_id: i64,
        stock_status: StockStatus,
    ) -> Result<()> {
        self.check()?;
        self.stock_updates
            .lock()
            .unwrap()
            .push((woo_product_id, stock_status));
        Ok(())
    }
}

#[derive(Default)]
struct FakeAccounting {
    contacts: Vec<AccountingContact>,
}

#[async_trait]
impl AccountingApiClient for FakeAccounting {
    async fn find_contact_by_email(&self, email: &str) -> Result<Option<AccountingContact>> {
        Ok(self
            .contacts
            .iter()
            .find(|c| c.email.as_deref() == Some(email))
            .cloned())
    }
}

struct Harness {
    _dir: TempDir,
    stores: Stores,
    recorder: Arc<JobResultService>,
    woo: Arc<FakeWoo>,
    service: SyncService,
}

async fn harness_with(woo: FakeWoo, accounting: FakeAccounting) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let registry = RepositoryRegistry::new(dir.path().join("sync.db").to_str().unwrap());
    let stores = Stores::from_registry(&registry).await.unwrap();
    let recorder = Arc::new(JobResultService::new(registry.job_results().await.unwrap()));
    let woo = Arc::new(woo);
    let service = SyncService::new(
        stores.clone(),
        woo.clone(),
        Arc::new(accounting),
        recorder.clone(),
    );
    Harness {
        _dir: dir,
        stores,
        recorder,
        woo,
        service,
    }
}

async fn harness(woo: FakeWoo) -> Harness {
    harness_with(woo, FakeAccounting::default()).await
}

fn billing(email: &str, first: &str, last: &str) -> WooBilling {
    WooBilling {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        ..Default::default()
    }
}

fn woo_order(id: i64, customer_id: i64, email: &str) -> WooOrder {
    WooOrder {
        id,
        status: "processing".to_string(),
        currency: "NOK".to_string(),
        total: "249.00".to_string(),
        customer_id,
        date_created_gmt: Some("2024-03-01T10:00:00".to_string()),
        billing: billing(email, "Kari", "Nordmann"),
        ..Default::default()
    }
}

fn woo_product(id: i64, name: &str) -> WooProduct {
    WooProduct {
        id,
        name: name.to_string(),
        sku: format!("SKU-{}", id),
        status: "publish".to_string(),
        stock_status: "instock".to_string(),
        price: "129.00".to_string(),
        ..Default::default()
    }
}

// ============================================================================
// Order import
// ============================================================================

#[tokio::test]
async fn test_import_orders_creates_orders_and_customers() {
    let h = harness(FakeWoo {
        orders: vec![
            woo_order(1001, 7, "kari@example.com"),
            woo_order(1002, 7, "kari@example.com"),
            woo_order(1003, 0, "guest@example.com"),
        ],
        ..Default::default()
    })
    .await;

    let outcome = h.service.import_orders(false).await.unwrap();
    assert_eq!(outcome, TaskOutcome::Succeeded(json!({ "imported": 3 })));

    let orders = h.stores.orders.find_all().unwrap();
    assert_eq!(orders.len(), 3);
    assert!(orders.iter().all(|o| o.total == dec!(249.00)));
    assert!(orders.iter().all(|o| o.customer_id.is_some()));

    let customers = h.stores.customers.find_all().unwrap();
    assert_eq!(customers.len(), 2);
    let kari = customers.iter().find(|c| c.woo_customer_id == Some(7)).unwrap();
    assert_eq!(kari.full_name(), "Kari Nordmann");

    let last = h.recorder.get_last_result(TASK_IMPORT_ORDERS).unwrap().unwrap();
    assert_eq!(last.result.as_deref(), Some("{\"imported\":3}"));
}

#[tokio::test]
async fn test_import_orders_is_idempotent() {
    let h = harness(FakeWoo {
        orders: vec![woo_order(1001, 7, "kari@example.com")],
        ..Default::default()
    })
    .await;

    h.service.import_orders(true).await.unwrap();
    h.service.import_orders(true).await.unwrap();

    assert_eq!(h.stores.orders.find_all().unwrap().len(), 1);
    assert_eq!(h.stores.customers.find_all().unwrap().len(), 1);
    assert_eq!(h.recorder.get_results(Some(TASK_IMPORT_ORDERS)).unwrap().len(), 2);
}

#[tokio::test]
async fn test_incremental_import_starts_from_last_success() {
    let h = harness(FakeWoo::default()).await;

    h.service.import_orders(false).await.unwrap();
    h.service.import_orders(false).await.unwrap();
    h.service.import_orders(true).await.unwrap();

    let first_run = h
        .recorder
        .get_results(Some(TASK_IMPORT_ORDERS))
        .unwrap()
        .pop()
        .unwrap();
    let queries = h.woo.order_queries.lock().unwrap().clone();
    assert_eq!(queries, vec![None, Some(first_run.job_started_at), None]);
}

#[tokio::test]
async fn test_import_failure_is_recorded() {
    let h = harness(FakeWoo {
        fail_with: Some("Timeout".to_string()),
        ..Default::default()
    })
    .await;

    let outcome = h.service.import_orders(false).await.unwrap();
    assert_eq!(outcome, TaskOutcome::Failed("Timeout".to_string()));
    assert_eq!(outcome.into_body(), json!({ "errors": "Timeout" }));

    let last = h.recorder.get_last_result(TASK_IMPORT_ORDERS).unwrap().unwrap();
    assert!(last.result.is_none());
    assert_eq!(last.errors.as_deref(), Some("Timeout"));
}

#[tokio::test]
async fn test_failed_runs_do_not_move_the_incremental_window() {
    let h = harness(FakeWoo::default()).await;
    h.recorder
        .create_result(TASK_IMPORT_ORDERS, Utc::now(), None, Some("Timeout".into()))
        .await
        .unwrap();

    h.service.import_orders(false).await.unwrap();
    assert_eq!(h.woo.order_queries.lock().unwrap()[0], None);
}

// ============================================================================
// Subscriptions and gifts
// ============================================================================

#[tokio::test]
async fn test_import_subscriptions_links_customer_and_product() {
    let h = harness(FakeWoo {
        subscriptions: vec![WooSubscription {
            id: 300,
            status: "active".to_string(),
            customer_id: 7,
            billing_period: "week".to_string(),
            billing_interval: json!("2"),
            next_payment_date_gmt: Some("2024-03-12T00:00:00".to_string()),
            billing: billing("kari@example.com", "Kari", "Nordmann"),
            line_items: vec![WooLineItem {
                id: 1,
                product_id: 42,
                quantity: 2,
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    })
    .await;

    let mut product = Product::new("Kenya", ProductType::Coffee, dec!(129));
    product.woo_product_id = Some(42);
    let product = h.stores.products.create(product).await.unwrap();

    let outcome = h.service.import_subscriptions().await.unwrap();
    assert_eq!(outcome.into_body(), json!({ "imported": 1 }));

    let subs = h.stores.subscriptions.find_all().unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].status, SubscriptionStatus::Active);
    assert_eq!(subs[0].frequency, SubscriptionFrequency::Fortnightly);
    assert_eq!(subs[0].quantity, 2);
    assert_eq!(subs[0].renewal_day, 12);
    assert_eq!(subs[0].product_id.as_deref(), Some(product.id.as_str()));
    assert!(subs[0].customer_id.is_some());
}

#[tokio::test]
async fn test_import_gift_subscriptions_from_order_lines() {
    let mut order = woo_order(2001, 7, "kari@example.com");
    order.line_items = vec![
        WooLineItem {
            id: 11,
            product_id: 42,
            sku: "KEN-250".to_string(),
            quantity: 1,
            ..Default::default()
        },
        WooLineItem {
            id: 12,
            product_id: 90,
            sku: "GIFT-3".to_string(),
            quantity: 1,
            meta_data: vec![
                WooMeta::new("recipient_name", "Nils Hansen"),
                WooMeta::new("recipient_email", "nils@example.com"),
            ],
            ..Default::default()
        },
    ];
    let h = harness(FakeWoo {
        orders: vec![order, woo_order(2002, 8, "ola@example.com")],
        ..Default::default()
    })
    .await;

    let outcome = h.service.import_gift_subscriptions().await.unwrap();
    assert_eq!(outcome.into_body(), json!({ "imported": 1 }));
    // Second run updates in place.
    h.service.import_gift_subscriptions().await.unwrap();

    let gifts = h.stores.subscriptions.find_all().unwrap();
    assert_eq!(gifts.len(), 1);
    let gift = &gifts[0];
    assert_eq!(gift.kind, SubscriptionKind::Gift);
    assert_eq!(gift.status, SubscriptionStatus::Active);
    assert_eq!(gift.gift_order_line_id, Some(12));
    assert_eq!(gift.gift_duration_months, Some(3));
    assert_eq!(gift.gift_recipient_name.as_deref(), Some("Nils Hansen"));

    // Only the purchaser of the gift order is created.
    assert_eq!(h.stores.customers.find_all().unwrap().len(), 1);
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_import_products_marks_missing_as_deleted() {
    let h = harness(FakeWoo {
        products: vec![woo_product(42, "Kenya"), woo_product(43, "Brazil")],
        ..Default::default()
    })
    .await;

    let mut gone = Product::new("Old blend", ProductType::Coffee, dec!(99));
    gone.woo_product_id = Some(7);
    gone.status = ProductStatus::Publish;
    let gone = h.stores.products.create(gone).await.unwrap();

    let outcome = h.service.import_products().await.unwrap();
    assert_eq!(outcome.into_body(), json!({ "imported": 2 }));

    let products = h.stores.products.find_all().unwrap();
    assert_eq!(products.len(), 3);
    let gone = products.iter().find(|p| p.id == gone.id).unwrap();
    assert!(gone.is_deleted());

    let last = h.recorder.get_last_result(TASK_IMPORT_PRODUCTS).unwrap().unwrap();
    assert!(last.succeeded());
}

#[tokio::test]
async fn test_cleanup_removes_deleted_products_absent_from_catalog() {
    let h = harness(FakeWoo {
        products: vec![woo_product(42, "Kenya")],
        ..Default::default()
    })
    .await;

    let mut still_listed = Product::new("Kenya", ProductType::Coffee, dec!(129));
    still_listed.woo_product_id = Some(42);
    still_listed.status = ProductStatus::Deleted;
    let mut gone = Product::new("Old blend", ProductType::Coffee, dec!(99));
    gone.woo_product_id = Some(7);
    gone.status = ProductStatus::Deleted;
    let mut local_only = Product::new("Sample", ProductType::Other, dec!(0));
    local_only.status = ProductStatus::Deleted;
    let live = Product::new("Brazil", ProductType::Coffee, dec!(119));

    for product in [still_listed, gone, local_only, live] {
        h.stores.products.create(product).await.unwrap();
    }

    let outcome = h.service.cleanup_products().await.unwrap();
    assert_eq!(outcome.into_body(), json!({ "checked": 4, "removed": 2 }));

    let names: Vec<String> = h
        .stores
        .products
        .find_all()
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Kenya".to_string()));
    assert!(names.contains(&"Brazil".to_string()));
}

#[tokio::test]
async fn test_stock_status_pushes_live_catalog_products() {
    let h = harness(FakeWoo::default()).await;

    let mut sold_out = Product::new("Kenya", ProductType::Coffee, dec!(129));
    sold_out.woo_product_id = Some(42);
    sold_out.stock_status = StockStatus::OutOfStock;
    let mut deleted = Product::new("Old blend", ProductType::Coffee, dec!(99));
    deleted.woo_product_id = Some(7);
    deleted.status = ProductStatus::Deleted;
    let local_only = Product::new("Sample", ProductType::Other, dec!(0));

    for product in [sold_out, deleted, local_only] {
        h.stores.products.create(product).await.unwrap();
    }

    let outcome = h.service.update_stock_status().await.unwrap();
    assert_eq!(outcome.into_body(), json!({ "updated": 1 }));
    assert_eq!(
        h.woo.stock_updates.lock().unwrap().clone(),
        vec![(42, StockStatus::OutOfStock)]
    );
}

// ============================================================================
// Renewals
// ============================================================================

async fn renewal_fixture(h: &Harness) -> Subscription {
    let mut customer = Customer::new("kari@example.com", "Kari", "Nordmann");
    customer.woo_customer_id = Some(7);
    let customer = h.stores.customers.create(customer).await.unwrap();

    let mut product = Product::new("Kenya", ProductType::Coffee, dec!(129));
    product.woo_product_id = Some(42);
    let product = h.stores.products.create(product).await.unwrap();

    let mut due = Subscription::new(SubscriptionKind::Private, SubscriptionFrequency::Monthly, 2);
    due.status = SubscriptionStatus::Active;
    due.renewal_day = 5;
    due.customer_id = Some(customer.id.clone());
    due.product_id = Some(product.id.clone());

    let mut no_product = due.clone();
    no_product.id = "no-product".to_string();
    no_product.product_id = None;

    let mut other_day = due.clone();
    other_day.id = "other-day".to_string();
    other_day.renewal_day = 6;

    for subscription in [no_product, other_day] {
        h.stores.subscriptions.create(subscription).await.unwrap();
    }
    h.stores.subscriptions.create(due).await.unwrap()
}

#[tokio::test]
async fn test_create_renewals_pushes_and_records_orders() {
    let h = harness(FakeWoo::default()).await;
    let due = renewal_fixture(&h).await;
    let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

    let summary = h.service.create_renewals_task(today, false).await.unwrap();
    assert_eq!(summary, RenewalSummary { created: 1, skipped: 2 });

    let pushed = h.woo.created_orders.lock().unwrap().clone();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].customer_id, 7);
    assert_eq!(pushed[0].line_items[0].product_id, 42);
    assert_eq!(pushed[0].line_items[0].quantity, 2);

    let orders = h.stores.orders.find_all().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_type, OrderType::Renewal);
    assert_eq!(orders[0].status, OrderStatus::Processing);
    assert_eq!(orders[0].subscription_id.as_deref(), Some(due.id.as_str()));

    let stamped = h.stores.subscriptions.find(&due.id).unwrap().unwrap();
    assert!(stamped.last_renewal_at.is_some());

    // The stamp prevents a second renewal in the same period.
    let again = h.service.create_renewals_task(today, false).await.unwrap();
    assert_eq!(again, RenewalSummary { created: 0, skipped: 3 });
}

#[tokio::test]
async fn test_failed_local_write_still_stamps_subscription() {
    let h = harness(FakeWoo::default()).await;
    let due = renewal_fixture(&h).await;
    let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

    // Holds the woo id the fake platform hands out first.
    let mut taken = Order::new(OrderType::NonRecurring, OrderStatus::Completed, dec!(89));
    taken.woo_order_id = Some(9001);
    h.stores.orders.create(taken).await.unwrap();

    let err = h.service.create_renewals_task(today, false).await.unwrap_err();
    assert!(matches!(err, Error::Database(_)));
    assert_eq!(h.stores.orders.find_all().unwrap().len(), 1);

    let stamped = h.stores.subscriptions.find(&due.id).unwrap().unwrap();
    assert!(stamped.last_renewal_at.is_some());

    let again = h.service.create_renewals_task(today, false).await.unwrap();
    assert_eq!(again, RenewalSummary { created: 0, skipped: 3 });
    assert_eq!(h.woo.created_orders.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ignore_renewal_day_renews_every_active_subscription() {
    let h = harness(FakeWoo::default()).await;
    renewal_fixture(&h).await;
    let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

    let summary = h.service.create_renewals_task(today, true).await.unwrap();
    assert_eq!(summary, RenewalSummary { created: 2, skipped: 1 });
}

#[tokio::test]
async fn test_preview_renewals_has_no_side_effects() {
    let h = harness(FakeWoo::default()).await;
    renewal_fixture(&h).await;

    let plan = h.service.preview_renewals(true).unwrap();
    assert_eq!(plan.due.len(), 3);
    assert!(h.woo.created_orders.lock().unwrap().is_empty());
    assert!(h.recorder.get_results(None).unwrap().is_empty());
}

// ============================================================================
// Customers
// ============================================================================

#[tokio::test]
async fn test_cleanup_customers_keeps_referenced() {
    let h = harness(FakeWoo::default()).await;

    let buyer = h
        .stores
        .customers
        .create(Customer::new("kari@example.com", "Kari", "Nordmann"))
        .await
        .unwrap();
    let subscriber = h
        .stores
        .customers
        .create(Customer::new("ola@example.com", "Ola", "Nordmann"))
        .await
        .unwrap();
    h.stores
        .customers
        .create(Customer::new("orphan@example.com", "Per", "Hansen"))
        .await
        .unwrap();

    let mut order = Order::new(OrderType::NonRecurring, OrderStatus::Completed, dec!(89));
    order.customer_id = Some(buyer.id.clone());
    h.stores.orders.create(order).await.unwrap();
    let mut subscription =
        Subscription::new(SubscriptionKind::Private, SubscriptionFrequency::Monthly, 1);
    subscription.customer_id = Some(subscriber.id.clone());
    h.stores.subscriptions.create(subscription).await.unwrap();

    let outcome = h.service.cleanup_customers().await.unwrap();
    assert_eq!(outcome.into_body(), json!({ "removed": 1 }));
    assert_eq!(h.stores.customers.find_all().unwrap().len(), 2);
}

#[tokio::test]
async fn test_accounting_lookup_stores_contact_id() {
    let h = harness_with(
        FakeWoo::default(),
        FakeAccounting {
            contacts: vec![AccountingContact {
                contact_id: 8812,
                name: "Kari Nordmann".to_string(),
                email: Some("kari@example.com".to_string()),
                customer_number: Some(10023),
            }],
        },
    )
    .await;
    let customer = h
        .stores
        .customers
        .create(Customer::new("kari@example.com", "Kari", "Nordmann"))
        .await
        .unwrap();

    let contact = h
        .service
        .lookup_accounting_contact(&customer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(contact.contact_id, 8812);

    let stored = h.stores.customers.find(&customer.id).unwrap().unwrap();
    assert_eq!(stored.accounting_contact_id, Some(8812));
}

#[tokio::test]
async fn test_accounting_lookup_unknown_customer() {
    let h = harness(FakeWoo::default()).await;
    let err = h
        .service
        .lookup_accounting_contact("missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
