use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use backoffice_core::{
    customers::Customer,
    orders::Order,
    views::{order_rows, OrderRow},
    Repository,
};

use super::required;
use crate::{
    error::{ApiResult, OrNotFound},
    main_lib::AppState,
};

async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<OrderRow>>> {
    let orders = state.registry.get_repository::<Order>().await?.find_all()?;
    let customers = state
        .registry
        .get_repository::<Customer>()
        .await?
        .find_all()?;
    Ok(Json(order_rows(orders, &customers)))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let id = required(&id, "id")?;
    let order = state
        .registry
        .get_repository::<Order>()
        .await?
        .find(id)
        .or_not_found()?;
    Ok(Json(order))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
}
