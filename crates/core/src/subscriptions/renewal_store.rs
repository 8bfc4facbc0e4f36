use async_trait::async_trait;

use super::Subscription;
use crate::orders::Order;
use crate::Result;

/// Persists the local side of a renewal.
#[async_trait]
pub trait RenewalStoreTrait: Send + Sync {
    /// Save the stamped subscription and insert its renewal order as one unit.
    /// Nothing is written when either part fails.
    async fn record_renewal(&self, subscription: Subscription, order: Order) -> Result<Order>;
}
