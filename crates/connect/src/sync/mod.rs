//! Sync tasks between the local store and the external platforms.

mod customers;
mod gifts;
mod models;
mod orders;
mod products;
mod renewals;
mod service;
mod subscriptions;

pub use models::*;
pub use service::{Stores, SyncService};

#[cfg(test)]
mod tests;
