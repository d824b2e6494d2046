//! Catalog API client for the EMI storefront.
//!
//! Talks to the catalog service over HTTP and turns its `{ success, data }`
//! envelopes into validated domain values from `emistore-commerce`.
//!
//! # Example
//!
//! ```rust,ignore
//! use emistore_data::prelude::*;
//! use emistore_commerce::{listing::ProductQuery, Slug};
//!
//! let catalog = HttpCatalog::from_config(&CatalogConfig::from_env()?)?;
//!
//! let phones = catalog
//!     .list_products(&ProductQuery::new().with_category("smartphones"))
//!     .await?;
//!
//! match catalog.get_product_by_slug(&Slug::new("phone-a")).await {
//!     Ok(product) => println!("{}", product.name()),
//!     Err(CatalogError::ProductNotFound { message, .. }) => eprintln!("{message}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

mod catalog;
mod client;
mod config;
mod envelope;
mod error;
mod transport;

pub use catalog::{CatalogRequest, CatalogResponse, CatalogService, HttpCatalog};
pub use client::FetchClient;
pub use config::{
    CatalogConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ENV_API_URL,
    ENV_TIMEOUT_SECS,
};
pub use envelope::ApiEnvelope;
pub use error::{
    CatalogError, CatalogResult, FetchError, LIST_FAILED_MESSAGE, PRODUCT_NOT_FOUND_MESSAGE,
};
pub use transport::{QueryParams, Transport, TransportResponse};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogConfig, CatalogError, CatalogRequest, CatalogResponse, CatalogService, FetchClient,
        FetchError, HttpCatalog,
    };
}
