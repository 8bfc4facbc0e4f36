use chrono::Utc;
use log::{info, warn};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use super::models::{ImportSummary, ProductCleanupSummary, StockSyncSummary};
use super::service::SyncService;
use crate::woo::mapping::apply_product;
use backoffice_core::errors::Result;
use backoffice_core::products::{Product, ProductStatus, ProductType};

impl SyncService {
    /// Import the full catalog. Local products the catalog no longer lists
    /// are marked deleted so the cleanup task can remove them.
    pub(crate) async fn import_products_task(&self) -> Result<ImportSummary> {
        let remote = self.ecommerce.fetch_products().await?;
        let mut existing: HashMap<i64, Product> = self
            .stores
            .products
            .find_all()?
            .into_iter()
            .filter_map(|p| p.woo_product_id.map(|id| (id, p)))
            .collect();

        let mut summary = ImportSummary::default();
        for woo in &remote {
            match existing.remove(&woo.id) {
                Some(current) => {
                    let mut updated = current.clone();
                    apply_product(&mut updated, woo);
                    if updated != current {
                        updated.updated_at = Utc::now().naive_utc();
                        self.stores.products.save(updated).await?;
                    }
                }
                None => {
                    let mut product = Product::new("", ProductType::Other, Decimal::ZERO);
                    apply_product(&mut product, woo);
                    self.stores.products.create(product).await?;
                }
            }
            summary.imported += 1;
        }

        for mut missing in existing.into_values().filter(|p| !p.is_deleted()) {
            warn!(
                "Product {} (woo id {:?}) is no longer in the catalog",
                missing.name, missing.woo_product_id
            );
            missing.status = ProductStatus::Deleted;
            missing.updated_at = Utc::now().naive_utc();
            self.stores.products.save(missing).await?;
        }

        info!("Imported {} products", summary.imported);
        Ok(summary)
    }

    /// Push the local stock status of every live catalog product.
    pub(crate) async fn update_stock_status_task(&self) -> Result<StockSyncSummary> {
        let mut summary = StockSyncSummary::default();
        for product in self.stores.products.find_all()? {
            let Some(woo_id) = product.woo_product_id else {
                continue;
            };
            if product.is_deleted() {
                continue;
            }
            self.ecommerce
                .update_stock_status(woo_id, product.stock_status)
                .await?;
            summary.updated += 1;
        }

        info!("Updated stock status of {} products", summary.updated);
        Ok(summary)
    }

    /// Remove deleted products that the catalog no longer knows about.
    pub(crate) async fn cleanup_products_task(&self) -> Result<ProductCleanupSummary> {
        let catalog: HashSet<i64> = self
            .ecommerce
            .fetch_products()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        let mut summary = ProductCleanupSummary::default();
        for product in self.stores.products.find_all()? {
            summary.checked += 1;
            if !product.is_deleted() {
                continue;
            }
            let known_remotely = product
                .woo_product_id
                .is_some_and(|id| catalog.contains(&id));
            if !known_remotely {
                summary.removed += self.stores.products.delete(&product.id).await?;
            }
        }

        info!(
            "Checked {} products, removed {}",
            summary.checked, summary.removed
        );
        Ok(summary)
    }
}
