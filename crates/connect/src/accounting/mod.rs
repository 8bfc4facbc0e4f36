//! Accounting platform integration.

mod client;

pub use client::AccountingClient;
