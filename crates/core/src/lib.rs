//! Backoffice Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the coffee subscription backoffice.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate and used by the `connect` sync tasks.

pub mod constants;
pub mod customers;
pub mod errors;
pub mod jobs;
pub mod orders;
pub mod products;
pub mod repository;
pub mod subscriptions;
pub mod utils;
pub mod views;

pub use repository::{Entity, Repository};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
