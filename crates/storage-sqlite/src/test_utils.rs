//! Temporary databases for storage tests.

use std::sync::Arc;
use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    pub path: String,
    _dir: TempDir,
}

impl TestDb {
    /// Must be called inside a Tokio runtime; the writer is a spawned task.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db").to_str().unwrap().to_string();
        let path = init(&path).unwrap();
        let pool = create_pool(&path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());
        Self {
            pool,
            writer,
            path,
            _dir: dir,
        }
    }
}
