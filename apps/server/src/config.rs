use anyhow::Context;
use std::{net::SocketAddr, time::Duration};

/// Credentials for the WooCommerce REST API.
#[derive(Debug, Clone, Default)]
pub struct WooConfig {
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

#[derive(Debug, Clone, Default)]
pub struct AccountingConfig {
    pub base_url: String,
    pub company: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub woo: WooConfig,
    pub accounting: AccountingConfig,
    pub scheduler_enabled: bool,
    pub scheduler_interval: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, `BO_*` names as in the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("BO_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid BO_LISTEN_ADDR")?;
        let cors_allow = var("BO_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("BO_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid BO_REQUEST_TIMEOUT_MS")?;
        let scheduler_enabled = parse_flag(&var("BO_SCHEDULER_ENABLED", "false"))
            .context("Invalid BO_SCHEDULER_ENABLED")?;
        let interval_mins: u64 = var("BO_SCHEDULER_INTERVAL_MINS", "60")
            .parse()
            .context("Invalid BO_SCHEDULER_INTERVAL_MINS")?;
        if interval_mins == 0 {
            anyhow::bail!("BO_SCHEDULER_INTERVAL_MINS must be at least 1");
        }

        Ok(Self {
            listen_addr,
            db_path: var("BO_DB_PATH", "./db/backoffice.db"),
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            woo: WooConfig {
                base_url: var("BO_WOO_BASE_URL", ""),
                consumer_key: var("BO_WOO_CONSUMER_KEY", ""),
                consumer_secret: var("BO_WOO_CONSUMER_SECRET", ""),
            },
            accounting: AccountingConfig {
                base_url: var("BO_ACCOUNTING_BASE_URL", ""),
                company: var("BO_ACCOUNTING_COMPANY", ""),
                token: var("BO_ACCOUNTING_TOKEN", ""),
            },
            scheduler_enabled,
            scheduler_interval: Duration::from_secs(interval_mins * 60),
        })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}
