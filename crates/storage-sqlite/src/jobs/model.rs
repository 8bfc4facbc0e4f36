//! Database model for job results.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use backoffice_core::jobs::{JobResult, NewJobResult};

/// Job results are insert-only, so there is no changeset.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::job_results)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct JobResultDB {
    pub id: String,
    pub name: String,
    pub result: Option<String>,
    pub errors: Option<String>,
    /// UTC, stored without offset
    pub job_started_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl JobResultDB {
    pub fn from_new(new_result: NewJobResult, now: NaiveDateTime) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            name: new_result.name,
            result: new_result.result,
            errors: new_result.errors,
            job_started_at: new_result.job_started_at.naive_utc(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<JobResultDB> for JobResult {
    fn from(db: JobResultDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            result: db.result,
            errors: db.errors,
            job_started_at: db.job_started_at.and_utc(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
