//! WooCommerce integration: REST client, wire types and mapping to domain models.

mod client;
pub mod mapping;
mod models;

pub use client::{WooClient, PER_PAGE};
pub use models::*;
