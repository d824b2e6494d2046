//! Catalog client error types.

use emistore_commerce::CommerceError;
use thiserror::Error;

/// Message used when a failed listing carries no reason.
pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Message used when a failed product lookup carries no reason.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found";

/// Transport-level failures talking to the catalog API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The connection could not be established or was dropped.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Non-2xx HTTP response.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Connection(e.to_string())
        }
    }
}

/// Failures surfaced by the catalog query service.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog could not be reached or answered with an unusable response.
    #[error("Catalog unavailable: {0}")]
    Unavailable(#[from] FetchError),

    /// The catalog answered but reported a failure.
    #[error("{message}")]
    Response { message: String },

    /// No product exists for the slug.
    #[error("{message}")]
    ProductNotFound { slug: String, message: String },

    /// Catalog data failed validation.
    #[error(transparent)]
    Malformed(#[from] CommerceError),
}

impl CatalogError {
    pub fn not_found(slug: impl Into<String>, message: Option<&str>) -> Self {
        CatalogError::ProductNotFound {
            slug: slug.into(),
            message: message.unwrap_or(PRODUCT_NOT_FOUND_MESSAGE).to_string(),
        }
    }

    pub fn response(message: Option<&str>) -> Self {
        CatalogError::Response {
            message: message.unwrap_or(LIST_FAILED_MESSAGE).to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, CatalogError::Unavailable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::ProductNotFound { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, CatalogError::Malformed(_))
    }
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
