//! Generic SQLite repository.
//!
//! A table plugs in by implementing [`SqliteEntity`] (usually through
//! [`sqlite_entity!`](crate::sqlite_entity)); [`SqliteRepository`] then provides
//! the core [`Repository`] contract for it. Reads use a pooled connection,
//! writes go through the [`WriteHandle`].

use async_trait::async_trait;
use diesel::{QueryResult, SqliteConnection};
use std::marker::PhantomData;
use std::sync::Arc;

use backoffice_core::errors::DatabaseError;
use backoffice_core::{Entity, Repository, Result};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;

/// Row-level operations for one table.
pub trait SqliteEntity: Entity {
    fn load(conn: &mut SqliteConnection, id: &str) -> QueryResult<Option<Self>>;
    fn load_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Self>>;
    fn insert(conn: &mut SqliteConnection, entity: &Self) -> QueryResult<usize>;
    fn update(conn: &mut SqliteConnection, entity: &Self) -> QueryResult<usize>;
    fn remove(conn: &mut SqliteConnection, id: &str) -> QueryResult<usize>;
}

/// Implements [`SqliteEntity`] for a domain type backed by a Diesel model
/// that converts to and from it.
#[macro_export]
macro_rules! sqlite_entity {
    ($entity:ty, $model:ty, $table:ident) => {
        impl $crate::repository::SqliteEntity for $entity {
            fn load(
                conn: &mut diesel::SqliteConnection,
                id: &str,
            ) -> diesel::QueryResult<Option<Self>> {
                use diesel::prelude::*;
                $crate::schema::$table::table
                    .find(id)
                    .select(<$model>::as_select())
                    .first::<$model>(conn)
                    .optional()
                    .map(|row| row.map(Into::into))
            }

            fn load_all(conn: &mut diesel::SqliteConnection) -> diesel::QueryResult<Vec<Self>> {
                use diesel::prelude::*;
                $crate::schema::$table::table
                    .select(<$model>::as_select())
                    .load::<$model>(conn)
                    .map(|rows| rows.into_iter().map(Into::into).collect())
            }

            fn insert(conn: &mut diesel::SqliteConnection, entity: &Self) -> diesel::QueryResult<usize> {
                use diesel::prelude::*;
                let row: $model = entity.clone().into();
                diesel::insert_into($crate::schema::$table::table)
                    .values(&row)
                    .execute(conn)
            }

            fn update(conn: &mut diesel::SqliteConnection, entity: &Self) -> diesel::QueryResult<usize> {
                use diesel::prelude::*;
                let row: $model = entity.clone().into();
                diesel::update($crate::schema::$table::table.find(row.id.clone()))
                    .set(&row)
                    .execute(conn)
            }

            fn remove(conn: &mut diesel::SqliteConnection, id: &str) -> diesel::QueryResult<usize> {
                use diesel::prelude::*;
                diesel::delete($crate::schema::$table::table.find(id)).execute(conn)
            }
        }
    };
}

/// [`Repository`] implementation shared by every [`SqliteEntity`].
pub struct SqliteRepository<E> {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    _entity: PhantomData<fn() -> E>,
}

impl<E> std::fmt::Debug for SqliteRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRepository").finish_non_exhaustive()
    }
}

impl<E: SqliteEntity> SqliteRepository<E> {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self {
            pool,
            writer,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: SqliteEntity> Repository<E> for SqliteRepository<E> {
    fn find(&self, id: &str) -> Result<Option<E>> {
        let mut conn = get_connection(&self.pool)?;
        E::load(&mut conn, id).into_core()
    }

    fn find_all(&self) -> Result<Vec<E>> {
        let mut conn = get_connection(&self.pool)?;
        E::load_all(&mut conn).into_core()
    }

    async fn create(&self, entity: E) -> Result<E> {
        self.writer
            .exec(move |conn| {
                E::insert(conn, &entity).into_core()?;
                Ok(entity)
            })
            .await
    }

    async fn save(&self, entity: E) -> Result<E> {
        self.writer
            .exec(move |conn| {
                if E::update(conn, &entity).into_core()? == 0 {
                    return Err(DatabaseError::NotFound(format!(
                        "{} {} not found",
                        E::NAME,
                        entity.id()
                    ))
                    .into());
                }
                Ok(entity)
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| E::remove(conn, &id).into_core())
            .await
    }
}
