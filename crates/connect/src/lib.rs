//! Backoffice Connect - integration with the e-commerce and accounting platforms.
//!
//! This crate holds the REST clients for both platforms and the sync tasks
//! that move data between them and the local store. Every task runs through
//! the job result recorder in `backoffice-core`.

mod client;

pub mod accounting;
pub mod sync;
pub mod traits;
pub mod woo;

pub use accounting::AccountingClient;
pub use client::DEFAULT_TIMEOUT_SECS;
pub use sync::{Stores, SyncService};
pub use traits::{AccountingApiClient, EcommerceApiClient, SyncServiceTrait};
pub use woo::WooClient;
