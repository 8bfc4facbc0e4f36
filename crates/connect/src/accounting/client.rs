//! HTTP client for the accounting platform's contact register.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;

use crate::client::{build_http_client, parse_response, request_error, DEFAULT_TIMEOUT_SECS};
use crate::traits::AccountingApiClient;
use backoffice_core::customers::AccountingContact;
use backoffice_core::errors::{Error, Result};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiContact {
    contact_id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    customer_number: Option<i64>,
}

impl From<ApiContact> for AccountingContact {
    fn from(api: ApiContact) -> Self {
        Self {
            contact_id: api.contact_id,
            name: api.name,
            email: api.email,
            customer_number: api.customer_number,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountingClient {
    client: reqwest::Client,
    base_url: String,
    company: String,
    auth_header: HeaderValue,
}

impl AccountingClient {
    pub fn new(base_url: &str, company: &str, token: &str) -> Result<Self> {
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Config(format!("Invalid accounting token format: {}", e)))?;

        Ok(Self {
            client: build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            base_url: base_url.trim_end_matches('/').to_string(),
            company: company.to_string(),
            auth_header,
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }
}

#[async_trait]
impl AccountingApiClient for AccountingClient {
    async fn find_contact_by_email(&self, email: &str) -> Result<Option<AccountingContact>> {
        let url = format!("{}/companies/{}/contacts", self.base_url, self.company);
        debug!("[Accounting] GET {} (email lookup)", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .query(&[("email", email)])
            .send()
            .await
            .map_err(request_error)?;

        let contacts: Vec<ApiContact> = parse_response(response).await?;
        Ok(contacts.into_iter().next().map(AccountingContact::from))
    }
}
