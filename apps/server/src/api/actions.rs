//! POST-only action endpoints that trigger sync tasks.
//!
//! Each call runs exactly one task, which records one job result. A task
//! failure still answers 200 with `{"errors": "<message>"}`; only a failure
//! to record the job result becomes an error response.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, MethodRouter},
    Json, Router,
};
use backoffice_core::jobs::TaskOutcome;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Flags accepted in the JSON body (or the query string).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionFlags {
    #[serde(default)]
    full: Option<bool>,
    #[serde(default)]
    ignore_renewal_day: Option<bool>,
}

impl ActionFlags {
    fn read(query: Result<Query<ActionFlags>, QueryRejection>, body: &Bytes) -> ApiResult<Self> {
        let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(query);
        }
        let parsed: ActionFlags = serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;
        Ok(ActionFlags {
            full: parsed.full.or(query.full),
            ignore_renewal_day: parsed.ignore_renewal_day.or(query.ignore_renewal_day),
        })
    }
}

fn respond(outcome: TaskOutcome) -> Json<Value> {
    Json(outcome.into_body())
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
}

async fn import_orders(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ActionFlags>, QueryRejection>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let flags = ActionFlags::read(query, &body)?;
    let outcome = state
        .sync_service
        .import_orders(flags.full.unwrap_or(false))
        .await?;
    Ok(respond(outcome))
}

async fn import_subscriptions(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(respond(state.sync_service.import_subscriptions().await?))
}

async fn import_gift_subscriptions(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(respond(state.sync_service.import_gift_subscriptions().await?))
}

async fn import_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(respond(state.sync_service.import_products().await?))
}

async fn create_renewal_orders(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ActionFlags>, QueryRejection>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let flags = ActionFlags::read(query, &body)?;
    let outcome = state
        .sync_service
        .create_renewal_orders(flags.ignore_renewal_day.unwrap_or(false))
        .await?;
    Ok(respond(outcome))
}

async fn update_stock_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(respond(state.sync_service.update_stock_status().await?))
}

async fn cleanup_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(respond(state.sync_service.cleanup_products().await?))
}

async fn cleanup_customers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(respond(state.sync_service.cleanup_customers().await?))
}

/// POST route answering every other method with 405.
fn action<H, T>(handler: H) -> MethodRouter<Arc<AppState>>
where
    H: axum::handler::Handler<T, Arc<AppState>>,
    T: 'static,
{
    post(handler).fallback(method_not_allowed)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/actions/orders/import", action(import_orders))
        .route("/actions/subscriptions/import", action(import_subscriptions))
        .route(
            "/actions/gift-subscriptions/import",
            action(import_gift_subscriptions),
        )
        .route("/actions/products/import", action(import_products))
        .route("/actions/renewals/create", action(create_renewal_orders))
        .route("/actions/products/stock-status", action(update_stock_status))
        .route("/actions/products/cleanup", action(cleanup_products))
        .route("/actions/customers/cleanup", action(cleanup_customers))
}
