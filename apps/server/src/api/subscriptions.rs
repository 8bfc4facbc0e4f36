use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use backoffice_core::{
    customers::Customer,
    subscriptions::Subscription,
    views::{subscription_rows, SubscriptionRow},
    Repository,
};

use super::required;
use crate::{
    error::{ApiResult, OrNotFound},
    main_lib::AppState,
};

async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SubscriptionRow>>> {
    let subscriptions = state
        .registry
        .get_repository::<Subscription>()
        .await?
        .find_all()?;
    let customers = state
        .registry
        .get_repository::<Customer>()
        .await?
        .find_all()?;
    Ok(Json(subscription_rows(subscriptions, &customers)))
}

async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Subscription>> {
    let id = required(&id, "id")?;
    let subscription = state
        .registry
        .get_repository::<Subscription>()
        .await?
        .find(id)
        .or_not_found()?;
    Ok(Json(subscription))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/subscriptions", get(list_subscriptions))
        .route("/subscriptions/{id}", get(get_subscription))
}
