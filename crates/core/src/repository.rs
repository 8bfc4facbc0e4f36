//! Generic repository contract shared by every business table.
//!
//! Storage backends implement [`Repository`] once for any [`Entity`]
//! instead of writing a repository per table.

use async_trait::async_trait;

use crate::Result;

/// A persisted business record with a text primary key.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable entity name, used in "not found" messages.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

/// Typed queries over one table.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Find a record by primary key.
    fn find(&self, id: &str) -> Result<Option<E>>;

    /// Load every record in the table.
    fn find_all(&self) -> Result<Vec<E>>;

    /// Insert a new record and return it as stored.
    async fn create(&self, entity: E) -> Result<E>;

    /// Overwrite an existing record and return it as stored.
    async fn save(&self, entity: E) -> Result<E>;

    /// Delete a record by primary key, returning the number of rows removed.
    async fn delete(&self, id: &str) -> Result<usize>;
}
