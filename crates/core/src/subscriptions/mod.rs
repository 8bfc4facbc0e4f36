//! Subscription domain models and renewal planning.

mod renewal;
mod renewal_store;
mod subscriptions_model;

pub use renewal::*;
pub use renewal_store::*;
pub use subscriptions_model::*;
