use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::customers::CustomerIndex;
use super::models::ImportSummary;
use super::service::SyncService;
use crate::woo::mapping::apply_order;
use backoffice_core::constants::TASK_IMPORT_ORDERS;
use backoffice_core::errors::Result;
use backoffice_core::orders::{Order, OrderStatus, OrderType};

impl SyncService {
    /// Import orders changed since the last successful import, or all of them.
    pub(crate) async fn import_orders_task(&self, full: bool) -> Result<ImportSummary> {
        let since = if full {
            None
        } else {
            self.last_successful_start(TASK_IMPORT_ORDERS)?
        };
        info!(
            "Importing orders ({})",
            since.map_or("full".to_string(), |s| format!("since {}", s))
        );

        let remote = self.ecommerce.fetch_orders(since).await?;

        let customers_repo = self.stores.customers.as_ref();
        let mut customers = CustomerIndex::load(customers_repo)?;
        let mut existing: HashMap<i64, Order> = self
            .stores
            .orders
            .find_all()?
            .into_iter()
            .filter_map(|o| o.woo_order_id.map(|id| (id, o)))
            .collect();

        let mut summary = ImportSummary::default();
        for woo in &remote {
            let customer_id = customers
                .resolve(customers_repo, woo.customer_id, &woo.billing)
                .await?;

            match existing.remove(&woo.id) {
                Some(current) => {
                    let mut updated = current.clone();
                    apply_order(&mut updated, woo);
                    if customer_id.is_some() {
                        updated.customer_id = customer_id;
                    }
                    if updated != current {
                        updated.updated_at = Utc::now().naive_utc();
                        self.stores.orders.save(updated).await?;
                    }
                }
                None => {
                    let mut order =
                        Order::new(OrderType::NonRecurring, OrderStatus::Pending, Decimal::ZERO);
                    apply_order(&mut order, woo);
                    order.customer_id = customer_id;
                    self.stores.orders.create(order).await?;
                }
            }
            summary.imported += 1;
        }

        info!("Imported {} orders", summary.imported);
        Ok(summary)
    }
}
