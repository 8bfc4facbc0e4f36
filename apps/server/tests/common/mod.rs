#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use backoffice_connect::woo::{NewWooOrder, WooBilling, WooOrder, WooProduct, WooSubscription};
use backoffice_connect::{AccountingApiClient, EcommerceApiClient};
use backoffice_core::customers::AccountingContact;
use backoffice_core::errors::{Error, Result};
use backoffice_core::products::StockStatus;
use backoffice_server::{api::app_router, build_state_with_clients, config::Config, AppState};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

#[derive(Default)]
pub struct FakeWoo {
    pub orders: Vec<WooOrder>,
    pub products: Vec<WooProduct>,
    pub fail_with: Option<String>,
    pub delay: Option<Duration>,
    pub stock_updates: Mutex<Vec<(i64, StockStatus)>>,
}

impl FakeWoo {
    fn check(&self) -> Result<()> {
        match &self.fail_with {
            Some(message) => Err(Error::external(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EcommerceApiClient for FakeWoo {
    async fn fetch_orders(&self, _modified_after: Option<DateTime<Utc>>) -> Result<Vec<WooOrder>> {
        self.check()?;
        Ok(self.orders.clone())
    }

    async fn fetch_subscriptions(&self) -> Result<Vec<WooSubscription>> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn fetch_products(&self) -> Result<Vec<WooProduct>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.check()?;
        Ok(self.products.clone())
    }

    async fn create_order(&self, _order: &NewWooOrder) -> Result<WooOrder> {
        self.check()?;
        Err(Error::external("orders cannot be created in tests"))
    }

    async fn update_stock_status(
        &self,
        woo_product_id: i64,
        stock_status: StockStatus,
    ) -> Result<()> {
        self.check()?;
        self.stock_updates
            .lock()
            .unwrap()
            .push((woo_product_id, stock_status));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAccounting {
    pub contacts: Vec<AccountingContact>,
}

#[async_trait]
impl AccountingApiClient for FakeAccounting {
    async fn find_contact_by_email(&self, email: &str) -> Result<Option<AccountingContact>> {
        Ok(self
            .contacts
            .iter()
            .find(|c| c.email.as_deref() == Some(email))
            .cloned())
    }
}

pub fn woo_order(id: i64, email: &str) -> WooOrder {
    WooOrder {
        id,
        status: "processing".to_string(),
        currency: "NOK".to_string(),
        total: "249.00".to_string(),
        customer_id: 7,
        date_created_gmt: Some("2024-05-02T10:00:00".to_string()),
        billing: WooBilling {
            first_name: "Kari".to_string(),
            last_name: "Nordmann".to_string(),
            email: email.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub woo: Arc<FakeWoo>,
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    let db_path = dir.path().join("backoffice.db").to_string_lossy().to_string();
    Config::from_lookup(|key| (key == "BO_DB_PATH").then(|| db_path.clone())).unwrap()
}

pub async fn test_app(woo: FakeWoo, accounting: FakeAccounting) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let woo = Arc::new(woo);
    let state = build_state_with_clients(&config, woo.clone(), Arc::new(accounting))
        .await
        .unwrap();
    TestApp {
        router: app_router(state.clone(), &config),
        state,
        woo,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        send(&self.router, builder.body(body).unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::POST, uri, body).await
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, value)
}
