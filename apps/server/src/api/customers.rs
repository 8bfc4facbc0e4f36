use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use backoffice_core::{
    customers::{AccountingContact, Customer},
    orders::Order,
    subscriptions::Subscription,
    views::{customer_rows, CustomerRow},
    Repository,
};

use super::required;
use crate::{
    error::{ApiResult, OrNotFound},
    main_lib::AppState,
};

async fn list_customers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<CustomerRow>>> {
    let registry = &state.registry;
    let customers = registry.get_repository::<Customer>().await?.find_all()?;
    let orders = registry.get_repository::<Order>().await?.find_all()?;
    let subscriptions = registry
        .get_repository::<Subscription>()
        .await?
        .find_all()?;
    Ok(Json(customer_rows(customers, &orders, &subscriptions)))
}

async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Customer>> {
    let id = required(&id, "id")?;
    let customer = state
        .registry
        .get_repository::<Customer>()
        .await?
        .find(id)
        .or_not_found()?;
    Ok(Json(customer))
}

/// Look the customer up at the accounting platform. `null` when unknown there.
async fn lookup_accounting_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<AccountingContact>>> {
    let id = required(&id, "id")?;
    let contact = state.sync_service.lookup_accounting_contact(id).await?;
    Ok(Json(contact))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/{id}", get(get_customer))
        .route("/customers/{id}/accounting", get(lookup_accounting_contact))
}
