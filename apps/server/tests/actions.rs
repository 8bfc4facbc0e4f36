mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use backoffice_connect::{Stores, SyncService};
use backoffice_core::constants::{
    TASK_CUSTOMER_CLEANUP, TASK_IMPORT_ORDERS, TASK_UPDATE_STOCK_STATUS,
};
use backoffice_core::errors::{DatabaseError, Result};
use backoffice_core::jobs::{JobResult, JobResultServiceTrait};
use backoffice_core::products::{Product, ProductType};
use backoffice_core::Repository;
use backoffice_server::{
    api::app_router, build_state_with_clients, scheduler::run_scheduled_sync, AppState,
};
use chrono::{DateTime, Utc};
use common::{test_app, test_config, woo_order, FakeAccounting, FakeWoo};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn import_orders_returns_summary_and_records_result() {
    let app = test_app(
        FakeWoo {
            orders: vec![
                woo_order(1001, "kari@example.com"),
                woo_order(1002, "kari@example.com"),
            ],
            ..Default::default()
        },
        FakeAccounting::default(),
    )
    .await;

    let (status, body) = app
        .post("/api/actions/orders/import", Some(r#"{"full": true}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "imported": 2 }));

    let results = app
        .state
        .job_result_service
        .get_results(Some(TASK_IMPORT_ORDERS))
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result.as_deref(), Some("{\"imported\":2}"));
    assert!(results[0].errors.is_none());
}

#[tokio::test]
async fn task_failure_answers_ok_with_error_message() {
    let app = test_app(
        FakeWoo {
            fail_with: Some("Timeout".to_string()),
            ..Default::default()
        },
        FakeAccounting::default(),
    )
    .await;

    let (status, body) = app.post("/api/actions/orders/import", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "errors": "Timeout" }));

    let last = app
        .state
        .job_result_service
        .get_last_result(TASK_IMPORT_ORDERS)
        .unwrap()
        .unwrap();
    assert!(last.result.is_none());
    assert_eq!(last.errors.as_deref(), Some("Timeout"));
}

#[tokio::test]
async fn other_methods_are_rejected_without_audit_row() {
    let app = test_app(FakeWoo::default(), FakeAccounting::default()).await;

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, body) = app
            .request(method, "/api/actions/products/import", None)
            .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "message": "Method not allowed" }));
    }

    assert!(app
        .state
        .job_result_service
        .get_results(None)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = test_app(FakeWoo::default(), FakeAccounting::default()).await;

    let (status, body) = app
        .post("/api/actions/orders/import", Some("{full"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(app
        .state
        .job_result_service
        .get_results(None)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn malformed_query_is_a_json_bad_request() {
    let app = test_app(FakeWoo::default(), FakeAccounting::default()).await;

    let (status, body) = app
        .post("/api/actions/orders/import?full=yes", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["message"].is_string());
    assert!(app
        .state
        .job_result_service
        .get_results(None)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn stock_status_action_pushes_local_products() {
    let app = test_app(FakeWoo::default(), FakeAccounting::default()).await;

    let mut product = Product::new("Kenya Kiambu", ProductType::Coffee, dec!(129));
    product.woo_product_id = Some(55);
    let products = app.state.registry.get_repository::<Product>().await.unwrap();
    products.create(product).await.unwrap();

    let (status, body) = app.post("/api/actions/products/stock-status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "updated": 1 }));
    assert_eq!(app.woo.stock_updates.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn customer_cleanup_is_recorded() {
    let app = test_app(FakeWoo::default(), FakeAccounting::default()).await;

    let (status, body) = app.post("/api/actions/customers/cleanup", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "removed": 0 }));

    let (status, last) = app
        .get(&format!("/api/job-results/{}/last", TASK_CUSTOMER_CLEANUP))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(last["name"], TASK_CUSTOMER_CLEANUP);
    assert_eq!(last["result"], "{\"removed\":0}");
}

#[tokio::test]
async fn scheduled_round_records_both_tasks() {
    let app = test_app(FakeWoo::default(), FakeAccounting::default()).await;

    run_scheduled_sync(&app.state).await;

    let service = &app.state.job_result_service;
    assert_eq!(service.get_results(Some(TASK_IMPORT_ORDERS)).unwrap().len(), 1);
    assert_eq!(
        service
            .get_results(Some(TASK_UPDATE_STOCK_STATUS))
            .unwrap()
            .len(),
        1
    );
}

/// Recorder whose storage is gone.
struct BrokenRecorder;

#[async_trait]
impl JobResultServiceTrait for BrokenRecorder {
    async fn create_result(
        &self,
        _task_name: &str,
        _started_at: DateTime<Utc>,
        _result: Option<String>,
        _errors: Option<String>,
    ) -> Result<()> {
        Err(DatabaseError::QueryFailed("disk I/O error".to_string()).into())
    }

    fn get_results(&self, _name_filter: Option<&str>) -> Result<Vec<JobResult>> {
        Ok(Vec::new())
    }

    fn get_last_result(&self, _task_name: &str) -> Result<Option<JobResult>> {
        Ok(None)
    }
}

#[tokio::test]
async fn audit_write_failure_is_a_server_error() {
    let app = test_app(FakeWoo::default(), FakeAccounting::default()).await;

    let recorder: Arc<dyn JobResultServiceTrait> = Arc::new(BrokenRecorder);
    let stores = Stores::from_registry(&app.state.registry).await.unwrap();
    let state = Arc::new(AppState {
        registry: app.state.registry.clone(),
        sync_service: Arc::new(SyncService::new(
            stores,
            app.woo.clone(),
            Arc::new(FakeAccounting::default()),
            recorder.clone(),
        )),
        job_result_service: recorder,
    });
    let dir = tempfile::tempdir().unwrap();
    let router = app_router(state, &test_config(&dir));

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/actions/products/cleanup")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = common::send(&router, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert!(body["message"].as_str().unwrap().contains("disk I/O error"));
}

#[tokio::test]
async fn slow_action_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    config.request_timeout = Duration::from_millis(20);
    let woo = Arc::new(FakeWoo {
        delay: Some(Duration::from_secs(5)),
        ..Default::default()
    });
    let state = build_state_with_clients(&config, woo, Arc::new(FakeAccounting::default()))
        .await
        .unwrap();
    let router = app_router(state, &config);

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/actions/products/import")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = common::send(&router, request).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}
