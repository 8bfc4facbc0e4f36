//! SQLite storage implementation for the backoffice.
//!
//! This crate is the only place where Diesel dependencies exist. It provides:
//! - Database bootstrap, pooling and the single writer actor
//! - Diesel migrations and schema
//! - A generic repository for the business tables
//! - The job result repository
//! - [`RepositoryRegistry`], the lazily initialized entry point used by the server
//!
//! ```text
//! core (domain)          connect (sync tasks)
//!       │                      │
//!       └──────────┬───────────┘
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod registry;
pub mod repository;
pub mod schema;
mod utils;

// Table storage
pub mod customers;
pub mod jobs;
pub mod orders;
pub mod products;
pub mod subscriptions;

#[cfg(test)]
mod test_utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use errors::{IntoCore, StorageError};
pub use jobs::JobResultRepository;
pub use registry::{Database, RepositoryHandle, RepositoryRegistry};
pub use repository::{SqliteEntity, SqliteRepository};
pub use subscriptions::RenewalRepository;

// Re-export from backoffice-core for convenience
pub use backoffice_core::errors::{DatabaseError, Error, Result};
