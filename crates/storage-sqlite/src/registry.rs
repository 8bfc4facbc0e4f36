//! Lazily initialized store plus a cache of derived repository handles.
//!
//! The registry opens the database on first use and derives each handle
//! type at most once. [`RepositoryRegistry::clear_cache`] drops the cached
//! handles; the next request derives fresh ones from the same database.

use log::{debug, info};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::OnceCell;

use backoffice_core::Result;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::jobs::JobResultRepository;
use crate::repository::{SqliteEntity, SqliteRepository};
use crate::subscriptions::RenewalRepository;

/// An open database: connection pool plus its single writer.
pub struct Database {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    path: String,
}

impl Database {
    /// Create the file if needed, apply migrations and start the writer.
    /// Must be called inside a Tokio runtime.
    pub fn open(db_path: &str) -> Result<Self> {
        let path = init(db_path)?;
        let pool = create_pool(&path)?;
        run_migrations(&pool)?;
        let writer = spawn_writer((*pool).clone());
        Ok(Self { pool, writer, path })
    }

    pub fn pool(&self) -> Arc<DbPool> {
        self.pool.clone()
    }

    pub fn writer(&self) -> WriteHandle {
        self.writer.clone()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Anything the registry can derive from an open [`Database`] and cache.
pub trait RepositoryHandle: Send + Sync + 'static {
    fn derive(database: &Database) -> Self;
}

impl<E: SqliteEntity> RepositoryHandle for SqliteRepository<E> {
    fn derive(database: &Database) -> Self {
        SqliteRepository::new(database.pool(), database.writer())
    }
}

impl RepositoryHandle for JobResultRepository {
    fn derive(database: &Database) -> Self {
        JobResultRepository::new(database.pool(), database.writer())
    }
}

impl RepositoryHandle for RenewalRepository {
    fn derive(database: &Database) -> Self {
        RenewalRepository::new(database.writer())
    }
}

type HandleMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

pub struct RepositoryRegistry {
    db_path: String,
    database: OnceCell<Arc<Database>>,
    handles: RwLock<HandleMap>,
    derivations: AtomicUsize,
}

impl RepositoryRegistry {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            database: OnceCell::new(),
            handles: RwLock::new(HashMap::new()),
            derivations: AtomicUsize::new(0),
        }
    }

    /// Open the database if that has not happened yet.
    ///
    /// Concurrent callers share one initialization. A failed attempt leaves
    /// the registry uninitialized, so a later call tries again.
    pub async fn ensure_initialized(&self) -> Result<Arc<Database>> {
        let database = self
            .database
            .get_or_try_init(|| async {
                info!("Opening database at {}", self.db_path);
                Database::open(&self.db_path).map(Arc::new)
            })
            .await?;
        Ok(database.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.database.initialized()
    }

    /// Cached handle of type `H`, derived on first request.
    pub async fn get_handle<H: RepositoryHandle>(&self) -> Result<Arc<H>> {
        if let Some(handle) = self.cached::<H>() {
            return Ok(handle);
        }

        let database = self.ensure_initialized().await?;
        let mut handles = self
            .handles
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have derived it while we waited for the lock.
        if let Some(handle) = downcast::<H>(&handles) {
            return Ok(handle);
        }

        debug!("Deriving repository handle {}", std::any::type_name::<H>());
        let handle = Arc::new(H::derive(&database));
        self.derivations.fetch_add(1, Ordering::SeqCst);
        handles.insert(TypeId::of::<H>(), handle.clone());
        Ok(handle)
    }

    /// Typed repository for one entity.
    pub async fn get_repository<E: SqliteEntity>(&self) -> Result<Arc<SqliteRepository<E>>> {
        self.get_handle::<SqliteRepository<E>>().await
    }

    pub async fn job_results(&self) -> Result<Arc<JobResultRepository>> {
        self.get_handle::<JobResultRepository>().await
    }

    pub async fn renewals(&self) -> Result<Arc<RenewalRepository>> {
        self.get_handle::<RenewalRepository>().await
    }

    /// Drop every cached handle. The database stays open.
    pub fn clear_cache(&self) {
        self.handles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of handles derived since the registry was created.
    pub fn derivation_count(&self) -> usize {
        self.derivations.load(Ordering::SeqCst)
    }

    fn cached<H: RepositoryHandle>(&self) -> Option<Arc<H>> {
        let handles = self.handles.read().unwrap_or_else(PoisonError::into_inner);
        downcast::<H>(&handles)
    }
}

fn downcast<H: RepositoryHandle>(handles: &HandleMap) -> Option<Arc<H>> {
    handles
        .get(&TypeId::of::<H>())
        .cloned()
        .and_then(|handle| handle.downcast::<H>().ok())
}
