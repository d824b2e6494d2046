//! Transport seam between the catalog service and HTTP.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Query string pairs sent with a request.
pub type QueryParams = [(&'static str, String)];

/// A raw HTTP response from the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Http {
                status: self.status,
                body: self.text(),
            })
        }
    }
}

/// Issues GET requests against the catalog API.
///
/// Paths are relative to the catalog base URL (`/products`, `/health`).
/// Implementations return every HTTP status as a response; only failures to
/// obtain a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &QueryParams) -> Result<TransportResponse, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, path: &str, query: &QueryParams) -> Result<TransportResponse, FetchError> {
        (**self).get(path, query).await
    }
}
