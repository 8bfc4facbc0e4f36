//! Job result domain models.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// One immutable audit record of a task invocation.
///
/// Normally exactly one of `result` or `errors` is set. Both may be `None`
/// when a task short-circuits before reaching either branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub id: String,
    /// Task identifier, shared by every run of the same task
    pub name: String,
    /// Serialized success payload (JSON text)
    pub result: Option<String>,
    /// Failure message
    pub errors: Option<String>,
    pub job_started_at: DateTime<Utc>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl JobResult {
    pub fn succeeded(&self) -> bool {
        self.errors.is_none() && self.result.is_some()
    }
}

/// Input for recording a job result. Ids and storage timestamps are
/// assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobResult {
    pub name: String,
    pub job_started_at: DateTime<Utc>,
    pub result: Option<String>,
    pub errors: Option<String>,
}

/// Trait for job result persistence. There is no update or delete path.
#[async_trait]
pub trait JobResultRepositoryTrait: Send + Sync {
    /// Insert one record
    async fn create(&self, new_result: NewJobResult) -> Result<JobResult>;

    /// Most recent records first, optionally restricted to an exact name
    fn list_recent(&self, name: Option<&str>, limit: i64) -> Result<Vec<JobResult>>;

    /// Most recent record for an exact name
    fn get_last(&self, name: &str) -> Result<Option<JobResult>>;
}
