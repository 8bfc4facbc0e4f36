use chrono::Utc;
use log::info;
use std::collections::HashMap;

use super::customers::CustomerIndex;
use super::models::ImportSummary;
use super::service::SyncService;
use crate::woo::mapping::apply_subscription;
use backoffice_core::errors::Result;
use backoffice_core::subscriptions::{Subscription, SubscriptionFrequency, SubscriptionKind};

impl SyncService {
    pub(crate) async fn import_subscriptions_task(&self) -> Result<ImportSummary> {
        let remote = self.ecommerce.fetch_subscriptions().await?;

        let customers_repo = self.stores.customers.as_ref();
        let mut customers = CustomerIndex::load(customers_repo)?;
        let products_by_woo_id: HashMap<i64, String> = self
            .stores
            .products
            .find_all()?
            .into_iter()
            .filter_map(|p| p.woo_product_id.map(|id| (id, p.id)))
            .collect();
        let mut existing: HashMap<i64, Subscription> = self
            .stores
            .subscriptions
            .find_all()?
            .into_iter()
            .filter_map(|s| s.woo_subscription_id.map(|id| (id, s)))
            .collect();

        let mut summary = ImportSummary::default();
        for woo in &remote {
            let customer_id = customers
                .resolve(customers_repo, woo.customer_id, &woo.billing)
                .await?;
            let product_id = woo
                .line_items
                .first()
                .and_then(|line| products_by_woo_id.get(&line.product_id).cloned());

            let current = existing.remove(&woo.id);
            let mut subscription = current.clone().unwrap_or_else(|| {
                Subscription::new(SubscriptionKind::Private, SubscriptionFrequency::Monthly, 1)
            });
            apply_subscription(&mut subscription, woo);
            subscription.customer_id = customer_id.or(subscription.customer_id);
            subscription.product_id = product_id.or(subscription.product_id);

            match current {
                Some(current) if current == subscription => {}
                Some(_) => {
                    subscription.updated_at = Utc::now().naive_utc();
                    self.stores.subscriptions.save(subscription).await?;
                }
                None => {
                    self.stores.subscriptions.create(subscription).await?;
                }
            }
            summary.imported += 1;
        }

        info!("Imported {} subscriptions", summary.imported);
        Ok(summary)
    }
}
