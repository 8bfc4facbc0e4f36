//! Sync service: runs each task through the job result recorder.

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;

use crate::traits::{AccountingApiClient, EcommerceApiClient, SyncServiceTrait};
use backoffice_core::constants::{
    TASK_CUSTOMER_CLEANUP, TASK_PRODUCT_CLEANUP, TASK_CREATE_RENEWAL_ORDERS,
    TASK_IMPORT_GIFT_SUBSCRIPTIONS, TASK_IMPORT_ORDERS, TASK_IMPORT_PRODUCTS,
    TASK_IMPORT_SUBSCRIPTIONS, TASK_UPDATE_STOCK_STATUS,
};
use backoffice_core::customers::{AccountingContact, Customer};
use backoffice_core::errors::Result;
use backoffice_core::jobs::{run_task, JobResultServiceTrait, TaskOutcome};
use backoffice_core::orders::Order;
use backoffice_core::products::Product;
use backoffice_core::subscriptions::{
    plan_renewals, RenewalPlan, RenewalStoreTrait, Subscription,
};
use backoffice_core::Repository;
use backoffice_storage_sqlite::RepositoryRegistry;

/// Repositories the sync tasks read and write.
#[derive(Clone)]
pub struct Stores {
    pub customers: Arc<dyn Repository<Customer>>,
    pub products: Arc<dyn Repository<Product>>,
    pub orders: Arc<dyn Repository<Order>>,
    pub subscriptions: Arc<dyn Repository<Subscription>>,
    pub renewals: Arc<dyn RenewalStoreTrait>,
}

impl Stores {
    /// Resolve every repository through the registry, opening the database if needed.
    pub async fn from_registry(registry: &RepositoryRegistry) -> Result<Self> {
        Ok(Self {
            customers: registry.get_repository::<Customer>().await?,
            products: registry.get_repository::<Product>().await?,
            orders: registry.get_repository::<Order>().await?,
            subscriptions: registry.get_repository::<Subscription>().await?,
            renewals: registry.renewals().await?,
        })
    }
}

pub struct SyncService {
    pub(crate) stores: Stores,
    pub(crate) ecommerce: Arc<dyn EcommerceApiClient>,
    pub(crate) accounting: Arc<dyn AccountingApiClient>,
    recorder: Arc<dyn JobResultServiceTrait>,
}

impl SyncService {
    pub fn new(
        stores: Stores,
        ecommerce: Arc<dyn EcommerceApiClient>,
        accounting: Arc<dyn AccountingApiClient>,
        recorder: Arc<dyn JobResultServiceTrait>,
    ) -> Self {
        Self {
            stores,
            ecommerce,
            accounting,
            recorder,
        }
    }

    /// Start time of the most recent successful run of `task_name`.
    pub(crate) fn last_successful_start(&self, task_name: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .recorder
            .get_results(Some(task_name))?
            .into_iter()
            .find(|r| r.succeeded())
            .map(|r| r.job_started_at))
    }
}

#[async_trait]
impl SyncServiceTrait for SyncService {
    async fn import_orders(&self, full: bool) -> Result<TaskOutcome> {
        run_task(
            self.recorder.as_ref(),
            TASK_IMPORT_ORDERS,
            self.import_orders_task(full),
        )
        .await
    }

    async fn import_subscriptions(&self) -> Result<TaskOutcome> {
        run_task(
            self.recorder.as_ref(),
            TASK_IMPORT_SUBSCRIPTIONS,
            self.import_subscriptions_task(),
        )
        .await
    }

    async fn import_gift_subscriptions(&self) -> Result<TaskOutcome> {
        run_task(
            self.recorder.as_ref(),
            TASK_IMPORT_GIFT_SUBSCRIPTIONS,
            self.import_gift_subscriptions_task(),
        )
        .await
    }

    async fn import_products(&self) -> Result<TaskOutcome> {
        run_task(
            self.recorder.as_ref(),
            TASK_IMPORT_PRODUCTS,
            self.import_products_task(),
        )
        .await
    }

    async fn create_renewal_orders(&self, ignore_renewal_day: bool) -> Result<TaskOutcome> {
        let today = Local::now().date_naive();
        run_task(
            self.recorder.as_ref(),
            TASK_CREATE_RENEWAL_ORDERS,
            self.create_renewals_task(today, ignore_renewal_day),
        )
        .await
    }

    async fn update_stock_status(&self) -> Result<TaskOutcome> {
        run_task(
            self.recorder.as_ref(),
            TASK_UPDATE_STOCK_STATUS,
            self.update_stock_status_task(),
        )
        .await
    }

    async fn cleanup_products(&self) -> Result<TaskOutcome> {
        run_task(
            self.recorder.as_ref(),
            TASK_PRODUCT_CLEANUP,
            self.cleanup_products_task(),
        )
        .await
    }

    async fn cleanup_customers(&self) -> Result<TaskOutcome> {
        run_task(
            self.recorder.as_ref(),
            TASK_CUSTOMER_CLEANUP,
            self.cleanup_customers_task(),
        )
        .await
    }

    fn preview_renewals(&self, ignore_renewal_day: bool) -> Result<RenewalPlan> {
        let subscriptions = self.stores.subscriptions.find_all()?;
        Ok(plan_renewals(
            &subscriptions,
            Local::now().date_naive(),
            ignore_renewal_day,
        ))
    }

    async fn lookup_accounting_contact(
        &self,
        customer_id: &str,
    ) -> Result<Option<AccountingContact>> {
        self.lookup_accounting_contact_for(customer_id).await
    }
}
