use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use super::{JobResult, JobResultRepositoryTrait, NewJobResult};
use crate::constants::{ALL_TASKS_FILTER, JOB_RESULTS_LIMIT};
use crate::Result;

#[async_trait]
pub trait JobResultServiceTrait: Send + Sync {
    async fn create_result(
        &self,
        task_name: &str,
        started_at: DateTime<Utc>,
        result: Option<String>,
        errors: Option<String>,
    ) -> Result<()>;

    fn get_results(&self, name_filter: Option<&str>) -> Result<Vec<JobResult>>;

    fn get_last_result(&self, task_name: &str) -> Result<Option<JobResult>>;
}

/// Records and lists task invocations.
pub struct JobResultService {
    repository: Arc<dyn JobResultRepositoryTrait>,
}

impl JobResultService {
    pub fn new(repository: Arc<dyn JobResultRepositoryTrait>) -> Self {
        Self { repository }
    }
}

/// `None` and the `"all"` sentinel both mean no filtering.
fn effective_filter(name_filter: Option<&str>) -> Option<&str> {
    name_filter.filter(|name| *name != ALL_TASKS_FILTER)
}

#[async_trait]
impl JobResultServiceTrait for JobResultService {
    async fn create_result(
        &self,
        task_name: &str,
        started_at: DateTime<Utc>,
        result: Option<String>,
        errors: Option<String>,
    ) -> Result<()> {
        debug!(
            "Recording job result for '{}' (failed: {})",
            task_name,
            errors.is_some()
        );
        self.repository
            .create(NewJobResult {
                name: task_name.to_string(),
                job_started_at: started_at,
                result,
                errors,
            })
            .await?;
        Ok(())
    }

    fn get_results(&self, name_filter: Option<&str>) -> Result<Vec<JobResult>> {
        self.repository
            .list_recent(effective_filter(name_filter), JOB_RESULTS_LIMIT)
    }

    fn get_last_result(&self, task_name: &str) -> Result<Option<JobResult>> {
        self.repository.get_last(task_name)
    }
}
