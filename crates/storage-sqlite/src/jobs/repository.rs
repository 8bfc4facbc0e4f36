use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use backoffice_core::errors::Result;
use backoffice_core::jobs::{JobResult, JobResultRepositoryTrait, NewJobResult};

use super::model::JobResultDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::job_results;

pub struct JobResultRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl JobResultRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl JobResultRepositoryTrait for JobResultRepository {
    async fn create(&self, new_result: NewJobResult) -> Result<JobResult> {
        let row = JobResultDB::from_new(new_result, Utc::now().naive_utc());

        self.writer
            .exec(move |conn| {
                diesel::insert_into(job_results::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(JobResult::from(row))
            })
            .await
    }

    fn list_recent(&self, name: Option<&str>, limit: i64) -> Result<Vec<JobResult>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = match name {
            Some(name) => job_results::table
                .filter(job_results::name.eq(name))
                .select(JobResultDB::as_select())
                .order(job_results::created_at.desc())
                .then_order_by(job_results::id.desc())
                .limit(limit)
                .load::<JobResultDB>(&mut conn),
            None => job_results::table
                .select(JobResultDB::as_select())
                .order(job_results::created_at.desc())
                .then_order_by(job_results::id.desc())
                .limit(limit)
                .load::<JobResultDB>(&mut conn),
        }
        .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(JobResult::from).collect())
    }

    fn get_last(&self, name: &str) -> Result<Option<JobResult>> {
        Ok(self.list_recent(Some(name), 1)?.into_iter().next())
    }
}
