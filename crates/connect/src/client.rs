//! HTTP plumbing shared by the external API clients.

use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;

use backoffice_core::errors::{Error, Result};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))
}

/// Map a transport failure. Timeouts are reported as a bare `Timeout`.
pub(crate) fn request_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::external("Timeout")
    } else {
        Error::external(format!("Request failed: {}", err))
    }
}

/// Parse an HTTP response, turning non-2xx statuses into external API errors.
pub(crate) async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(request_error)?;

    if !status.is_success() {
        debug!("API error response {}: {}", status, body);
        if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            if let Some(msg) = err.message.or(err.error).or(err.code) {
                return Err(Error::external(format!("API error {}: {}", status.as_u16(), msg)));
            }
        }
        return Err(Error::external(format!(
            "API error {}: {}",
            status.as_u16(),
            body.chars().take(200).collect::<String>()
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        Error::external(format!(
            "Failed to parse response: {} - {}",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })
}
