use std::sync::Arc;

use crate::config::Config;
use backoffice_connect::{
    AccountingApiClient, AccountingClient, EcommerceApiClient, Stores, SyncService,
    SyncServiceTrait, WooClient,
};
use backoffice_core::jobs::{JobResultService, JobResultServiceTrait};
use backoffice_storage_sqlite::RepositoryRegistry;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub registry: Arc<RepositoryRegistry>,
    pub sync_service: Arc<dyn SyncServiceTrait>,
    pub job_result_service: Arc<dyn JobResultServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("BO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    if config.woo.base_url.is_empty() {
        tracing::warn!("BO_WOO_BASE_URL is not set; sync actions will fail");
    }
    let ecommerce: Arc<dyn EcommerceApiClient> = Arc::new(WooClient::new(
        &config.woo.base_url,
        &config.woo.consumer_key,
        &config.woo.consumer_secret,
    )?);
    let accounting: Arc<dyn AccountingApiClient> = Arc::new(AccountingClient::new(
        &config.accounting.base_url,
        &config.accounting.company,
        &config.accounting.token,
    )?);
    build_state_with_clients(config, ecommerce, accounting).await
}

/// Wire the state around the given platform clients.
pub async fn build_state_with_clients(
    config: &Config,
    ecommerce: Arc<dyn EcommerceApiClient>,
    accounting: Arc<dyn AccountingApiClient>,
) -> anyhow::Result<Arc<AppState>> {
    let registry = Arc::new(RepositoryRegistry::new(config.db_path.clone()));
    let database = registry.ensure_initialized().await?;
    tracing::info!("Database path in use: {}", database.path());

    let stores = Stores::from_registry(&registry).await?;
    let job_result_service: Arc<dyn JobResultServiceTrait> =
        Arc::new(JobResultService::new(registry.job_results().await?));
    let sync_service: Arc<dyn SyncServiceTrait> = Arc::new(SyncService::new(
        stores,
        ecommerce,
        accounting,
        job_result_service.clone(),
    ));

    Ok(Arc::new(AppState {
        registry,
        sync_service,
        job_result_service,
    }))
}
