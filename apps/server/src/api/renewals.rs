use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use backoffice_core::subscriptions::RenewalPlan;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PreviewQuery {
    #[serde(default)]
    ignore_renewal_day: bool,
}

/// What the renewal action would create right now.
async fn preview_renewals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Json<RenewalPlan>> {
    let plan = state
        .sync_service
        .preview_renewals(query.ignore_renewal_day)?;
    Ok(Json(plan))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/renewals/preview", get(preview_renewals))
}
