//! Writes a renewal order together with its subscription stamp.

use async_trait::async_trait;

use backoffice_core::errors::DatabaseError;
use backoffice_core::orders::Order;
use backoffice_core::subscriptions::{RenewalStoreTrait, Subscription};
use backoffice_core::Result;

use crate::db::WriteHandle;
use crate::errors::IntoCore;
use crate::repository::SqliteEntity;

pub struct RenewalRepository {
    writer: WriteHandle,
}

impl RenewalRepository {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl RenewalStoreTrait for RenewalRepository {
    async fn record_renewal(&self, subscription: Subscription, order: Order) -> Result<Order> {
        self.writer
            .exec(move |conn| {
                if Subscription::update(conn, &subscription).into_core()? == 0 {
                    return Err(DatabaseError::NotFound(format!(
                        "subscription {} not found",
                        subscription.id
                    ))
                    .into());
                }
                Order::insert(conn, &order).into_core()?;
                Ok(order)
            })
            .await
    }
}
