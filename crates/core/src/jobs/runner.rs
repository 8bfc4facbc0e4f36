//! Runs a named task and leaves exactly one audit record behind.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;

use super::JobResultServiceTrait;
use crate::errors::Error;
use crate::Result;

/// Terminal state of a task invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The task's serialized output
    Succeeded(Value),
    /// The failure message, as recorded in the audit row
    Failed(String),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded(_))
    }

    /// JSON body returned to the caller: the payload on success,
    /// `{ "errors": <message> }` on failure.
    pub fn into_body(self) -> Value {
        match self {
            TaskOutcome::Succeeded(value) => value,
            TaskOutcome::Failed(message) => json!({ "errors": message }),
        }
    }
}

/// Run `task` under `task_name`.
///
/// Task failures never surface as `Err`: they are recorded and returned as
/// [`TaskOutcome::Failed`]. Only a failure to write the failure record
/// itself is propagated.
pub async fn run_task<T, Fut>(
    recorder: &dyn JobResultServiceTrait,
    task_name: &str,
    task: Fut,
) -> Result<TaskOutcome>
where
    T: Serialize,
    Fut: Future<Output = Result<T>>,
{
    let started_at = Utc::now();
    info!("Task '{}' started", task_name);

    let serialized = task.await.and_then(|output| {
        let value = serde_json::to_value(&output)?;
        let text = serde_json::to_string(&value)?;
        Ok((value, text))
    });

    let (value, text) = match serialized {
        Ok(pair) => pair,
        Err(err) => return record_failure(recorder, task_name, started_at, err).await,
    };

    match recorder
        .create_result(task_name, started_at, Some(text), None)
        .await
    {
        Ok(()) => {
            info!("Task '{}' completed", task_name);
            Ok(TaskOutcome::Succeeded(value))
        }
        Err(err) => record_failure(recorder, task_name, started_at, err).await,
    }
}

async fn record_failure(
    recorder: &dyn JobResultServiceTrait,
    task_name: &str,
    started_at: DateTime<Utc>,
    err: Error,
) -> Result<TaskOutcome> {
    let message = err.to_string();
    warn!("Task '{}' failed: {}", task_name, message);
    recorder
        .create_result(task_name, started_at, None, Some(message.clone()))
        .await?;
    Ok(TaskOutcome::Failed(message))
}
