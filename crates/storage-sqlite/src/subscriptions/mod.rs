//! SQLite storage for subscriptions, gift subscriptions included.

mod model;
mod renewals;

pub use model::SubscriptionDB;
pub use renewals::RenewalRepository;
