//! Gift subscriptions are bought as order line items with a `GIFT` SKU.

use chrono::Utc;
use log::info;
use std::collections::HashMap;

use super::customers::CustomerIndex;
use super::models::ImportSummary;
use super::service::SyncService;
use crate::woo::mapping::{gift_details, gift_status, is_gift_line, order_status};
use backoffice_core::errors::Result;
use backoffice_core::subscriptions::{Subscription, SubscriptionFrequency, SubscriptionKind};

impl SyncService {
    pub(crate) async fn import_gift_subscriptions_task(&self) -> Result<ImportSummary> {
        let remote = self.ecommerce.fetch_orders(None).await?;

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
            .filter_map(|s| s.gift_order_line_id.map(|id| (id, s)))
            .collect();

        let mut summary = ImportSummary::default();
        for order in &remote {
            let lines: Vec<_> = order.line_items.iter().filter(|l| is_gift_line(l)).collect();
            if lines.is_empty() {
                continue;
            }
            let purchaser = customers
                .resolve(customers_repo, order.customer_id, &order.billing)
                .await?;
            let status = gift_status(order_status(&order.status));

            for line in lines {
                let details = gift_details(line);
                let current = existing.remove(&line.id);
                let mut gift = current.clone().unwrap_or_else(|| {
                    Subscription::new(SubscriptionKind::Gift, SubscriptionFrequency::Monthly, 1)
                });
                gift.kind = SubscriptionKind::Gift;
                gift.gift_order_line_id = Some(line.id);
                gift.status = status;
                gift.quantity = line.quantity.max(1);
                gift.customer_id = purchaser.clone().or(gift.customer_id);
                gift.product_id = products_by_woo_id
                    .get(&line.product_id)
                    .cloned()
                    .or(gift.product_id);
                gift.gift_recipient_name = details.recipient_name;
                gift.gift_recipient_email = details.recipient_email;
                gift.gift_duration_months = details.duration_months;
                gift.gift_first_delivery = details.first_delivery;

                match current {
                    Some(current) if current == gift => {}
                    Some(_) => {
                        gift.updated_at = Utc::now().naive_utc();
                        self.stores.subscriptions.save(gift).await?;
                    }
                    None => {
                        self.stores.subscriptions.create(gift).await?;
                    }
                }
                summary.imported += 1;
            }
        }

        info!("Imported {} gift subscriptions", summary.imported);
        Ok(summary)
    }
}
