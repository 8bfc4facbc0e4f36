//! HTTP client for the WooCommerce REST API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::models::{NewWooOrder, StockStatusUpdate, WooOrder, WooProduct, WooSubscription};
use crate::client::{build_http_client, parse_response, request_error, DEFAULT_TIMEOUT_SECS};
use crate::traits::EcommerceApiClient;
use backoffice_core::errors::Result;
use backoffice_core::products::StockStatus;
use backoffice_core::utils::enum_to_text;

const API_PREFIX: &str = "/wp-json/wc/v3";

/// Page size for list endpoints; 100 is the API maximum.
pub const PER_PAGE: usize = 100;

/// Upper bound on pages fetched from one list endpoint.
const MAX_PAGES: u32 = 1000;

#[derive(Debug, Clone)]
pub struct WooClient {
    client: reqwest::Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl WooClient {
    pub fn new(base_url: &str, consumer_key: &str, consumer_secret: &str) -> Result<Self> {
        Self::with_timeout(
            base_url,
            consumer_key,
            consumer_secret,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
    }

    /// Walk a list endpoint page by page until a short page comes back.
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            debug!("[Woo] GET {} page {}", path, page);
            let response = self
                .request(reqwest::Method::GET, path)
                .query(&[("page", page.to_string()), ("per_page", PER_PAGE.to_string())])
                .query(extra)
                .send()
                .await
                .map_err(request_error)?;

            let batch: Vec<T> = parse_response(response).await?;
            let done = batch.len() < PER_PAGE;
            items.extend(batch);
            if done {
                break;
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl EcommerceApiClient for WooClient {
    async fn fetch_orders(&self, modified_after: Option<DateTime<Utc>>) -> Result<Vec<WooOrder>> {
        let mut params = Vec::new();
        if let Some(since) = modified_after {
            params.push((
                "modified_after",
                since.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ));
            params.push(("dates_are_gmt", "true".to_string()));
        }
        let orders: Vec<WooOrder> = self.get_all("/orders", &params).await?;
        info!("[Woo] Fetched {} orders", orders.len());
        Ok(orders)
    }

    async fn fetch_subscriptions(&self) -> Result<Vec<WooSubscription>> {
        let subscriptions: Vec<WooSubscription> = self.get_all("/subscriptions", &[]).await?;
        info!("[Woo] Fetched {} subscriptions", subscriptions.len());
        Ok(subscriptions)
    }

    async fn fetch_products(&self) -> Result<Vec<WooProduct>> {
        let products: Vec<WooProduct> = self.get_all("/products", &[]).await?;
        info!("[Woo] Fetched {} products", products.len());
        Ok(products)
    }

    async fn create_order(&self, order: &NewWooOrder) -> Result<WooOrder> {
        let response = self
            .request(reqwest::Method::POST, "/orders")
            .json(order)
            .send()
            .await
            .map_err(request_error)?;
        parse_response(response).await
    }

    async fn update_stock_status(
        &self,
        woo_product_id: i64,
        stock_status: StockStatus,
    ) -> Result<()> {
        let status = enum_to_text(&stock_status);
        let response = self
            .request(reqwest::Method::PUT, &format!("/products/{}", woo_product_id))
            .json(&StockStatusUpdate {
                stock_status: &status,
            })
            .send()
            .await
            .map_err(request_error)?;
        let _: WooProduct = parse_response(response).await?;
        Ok(())
    }
}
