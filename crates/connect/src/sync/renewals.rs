//! Renewal order generation.

use chrono::{NaiveDate, Utc};
use log::{info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::models::RenewalSummary;
use super::service::SyncService;
use crate::woo::mapping::{apply_order, BACKOFFICE_SUBSCRIPTION_META_KEY};
use crate::woo::{NewWooLineItem, NewWooOrder, WooBilling, WooMeta};
use backoffice_core::customers::Customer;
use backoffice_core::errors::Result;
use backoffice_core::orders::{Order, OrderStatus, OrderType};
use backoffice_core::products::Product;
use backoffice_core::subscriptions::{plan_renewals, RenewalCandidate};

const RENEWAL_ORDER_STATUS: &str = "processing";

fn renewal_order(
    candidate: &RenewalCandidate,
    customer: &Customer,
    woo_product_id: i64,
) -> NewWooOrder {
    NewWooOrder {
        customer_id: customer.woo_customer_id.unwrap_or(0),
        status: RENEWAL_ORDER_STATUS.to_string(),
        set_paid: false,
        billing: WooBilling {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone().unwrap_or_default(),
            ..Default::default()
        },
        line_items: vec![NewWooLineItem {
            product_id: woo_product_id,
            quantity: candidate.quantity.max(1),
        }],
        meta_data: vec![WooMeta::new(
            BACKOFFICE_SUBSCRIPTION_META_KEY,
            candidate.subscription_id.clone(),
        )],
    }
}

impl SyncService {
    /// Create renewal orders for subscriptions due on `today`.
    ///
    /// Candidates without a known customer or a catalog product cannot be
    /// ordered and count as skipped. The local order and the renewal stamp
    /// are written together. The first failure aborts the run; orders created
    /// before it keep their renewal stamp.
    pub(crate) async fn create_renewals_task(
        &self,
        today: NaiveDate,
        ignore_renewal_day: bool,
    ) -> Result<RenewalSummary> {
        let subscriptions = self.stores.subscriptions.find_all()?;
        let plan = plan_renewals(&subscriptions, today, ignore_renewal_day);

        let customers: HashMap<String, Customer> = self
            .stores
            .customers
            .find_all()?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let products: HashMap<String, Product> = self
            .stores
            .products
            .find_all()?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        let mut subscriptions: HashMap<String, _> = subscriptions
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        let mut summary = RenewalSummary {
            created: 0,
            skipped: plan.skipped.len(),
        };

        for candidate in &plan.due {
            let customer = candidate.customer_id.as_ref().and_then(|id| customers.get(id));
            let woo_product_id = candidate
                .product_id
                .as_ref()
                .and_then(|id| products.get(id))
                .filter(|p| !p.is_deleted())
                .and_then(|p| p.woo_product_id);

            let (Some(customer), Some(woo_product_id), Some(mut subscription)) = (
                customer,
                woo_product_id,
                subscriptions.remove(&candidate.subscription_id),
            ) else {
                warn!(
                    "Subscription {} has no customer or catalog product, skipping renewal",
                    candidate.subscription_id
                );
                summary.skipped += 1;
                continue;
            };

            let created = self
                .ecommerce
                .create_order(&renewal_order(candidate, customer, woo_product_id))
                .await?;

            let now = Utc::now().naive_utc();
            subscription.last_renewal_at = Some(now);
            subscription.updated_at = now;

            let mut order = Order::new(OrderType::Renewal, OrderStatus::Processing, Decimal::ZERO);
            apply_order(&mut order, &created);
            order.order_type = OrderType::Renewal;
            order.customer_id = Some(customer.id.clone());
            order.subscription_id = Some(candidate.subscription_id.clone());

            if let Err(err) = self
                .stores
                .renewals
                .record_renewal(subscription.clone(), order)
                .await
            {
                warn!(
                    "Woo order {} was created for subscription {} but could not be stored: {}",
                    created.id, candidate.subscription_id, err
                );
                // Stamp anyway so the next run does not order again.
                if let Err(stamp_err) = self.stores.subscriptions.save(subscription).await {
                    warn!(
                        "Could not stamp subscription {}: {}",
                        candidate.subscription_id, stamp_err
                    );
                }
                return Err(err);
            }
            summary.created += 1;
        }

        info!(
            "Created {} renewal orders, skipped {}",
            summary.created, summary.skipped
        );
        Ok(summary)
    }
}
