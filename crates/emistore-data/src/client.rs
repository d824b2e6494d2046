//! HTTP transport backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;

use crate::config::{CatalogConfig, ConfigError};
use crate::error::FetchError;
use crate::transport::{QueryParams, Transport, TransportResponse};

/// HTTP client for the catalog API.
///
/// Every request is sent relative to the configured base URL with a JSON
/// content type and the configured timeout.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    base_url: String,
}

impl FetchClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        config.validate().map_err(|e| match e {
            ConfigError::InvalidBaseUrl { .. } => FetchError::InvalidUrl(e.to_string()),
            ConfigError::InvalidTimeout { .. } => FetchError::Client(e.to_string()),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for FetchClient {
    async fn get(&self, path: &str, query: &QueryParams) -> Result<TransportResponse, FetchError> {
        let url = self.url(path);
        tracing::debug!(method = "GET", %url, ?query, "Making GET request to {}", path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(FetchError::from)
            .inspect_err(|e| tracing::error!(%url, error = %e, "catalog request failed"))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(FetchError::from)
            .inspect_err(|e| tracing::error!(%url, status, error = %e, "failed to read catalog response"))?;

        let response = TransportResponse::new(status, body.to_vec());
        if response.is_success() {
            tracing::debug!(%url, status, bytes = response.body.len(), "catalog response");
        } else {
            tracing::warn!(%url, status, body = %response.text(), "catalog returned an error status");
        }
        Ok(response)
    }
}
