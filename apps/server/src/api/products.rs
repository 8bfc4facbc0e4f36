use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use backoffice_core::{
    products::Product,
    views::{product_rows, ProductRow},
    Repository,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ProductQuery {
    #[serde(default)]
    include_deleted: bool,
}

async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Json<Vec<ProductRow>>> {
    let products = state
        .registry
        .get_repository::<Product>()
        .await?
        .find_all()?;
    Ok(Json(product_rows(products, query.include_deleted)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/products", get(list_products))
}
