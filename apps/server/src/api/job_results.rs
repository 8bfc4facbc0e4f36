use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use backoffice_core::jobs::JobResult;
use serde::Deserialize;

use super::required;
use crate::{
    error::{ApiResult, OrNotFound},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct JobResultQuery {
    name: Option<String>,
}

async fn list_job_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JobResultQuery>,
) -> ApiResult<Json<Vec<JobResult>>> {
    let name = query.name.as_deref().filter(|n| !n.trim().is_empty());
    Ok(Json(state.job_result_service.get_results(name)?))
}

async fn get_last_job_result(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<JobResult>> {
    let name = required(&name, "name")?;
    let last = state
        .job_result_service
        .get_last_result(name)
        .or_not_found()?;
    Ok(Json(last))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/job-results", get(list_job_results))
        .route("/job-results/{name}/last", get(get_last_job_result))
}
