//! Catalog query service.
//!
//! Each call issues exactly one upstream request; nothing is cached or
//! retried. Failures keep the transport / envelope distinction:
//!
//! | Upstream outcome                         | Error                         |
//! |------------------------------------------|-------------------------------|
//! | timeout, refused, non-2xx, not JSON      | [`CatalogError::Unavailable`] |
//! | 404 or `success:false` on a slug lookup  | [`CatalogError::ProductNotFound`] |
//! | `success:false` on a listing             | [`CatalogError::Response`]    |
//! | product data failing validation          | [`CatalogError::Malformed`]   |

use async_trait::async_trait;
use serde_json::Value;

use emistore_commerce::catalog::{
    validate_plans, validate_variants, EmiPlan, Product, ProductVariant, RawEmiPlan, RawProduct,
    RawVariant,
};
use emistore_commerce::listing::ProductQuery;
use emistore_commerce::Slug;

use crate::client::FetchClient;
use crate::config::CatalogConfig;
use crate::envelope::{decode_item, decode_list, ApiEnvelope};
use crate::error::{CatalogError, CatalogResult, FetchError};
use crate::transport::{Transport, TransportResponse};

/// A catalog read that can be issued again with [`CatalogService::reload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    List(ProductQuery),
    Product(Slug),
}

/// Result of a [`CatalogRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogResponse {
    List(Vec<Product>),
    Product(Product),
}

impl CatalogResponse {
    pub fn into_list(self) -> Option<Vec<Product>> {
        match self {
            CatalogResponse::List(products) => Some(products),
            CatalogResponse::Product(_) => None,
        }
    }

    pub fn into_product(self) -> Option<Product> {
        match self {
            CatalogResponse::Product(product) => Some(product),
            CatalogResponse::List(_) => None,
        }
    }
}

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Products matching `query`, in catalog order.
    async fn list_products(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>>;

    async fn get_product_by_slug(&self, slug: &Slug) -> CatalogResult<Product>;

    async fn get_variants(&self, slug: &Slug) -> CatalogResult<Vec<ProductVariant>>;

    async fn get_emi_plans(&self, slug: &Slug) -> CatalogResult<Vec<EmiPlan>>;

    /// Liveness probe; returns whatever body the service answers with.
    async fn health(&self) -> CatalogResult<Value>;

    /// Issue `request` again.
    async fn reload(&self, request: &CatalogRequest) -> CatalogResult<CatalogResponse> {
        tracing::debug!(?request, "reloading");
        match request {
            CatalogRequest::List(query) => self.list_products(query).await.map(CatalogResponse::List),
            CatalogRequest::Product(slug) => self
                .get_product_by_slug(slug)
                .await
                .map(CatalogResponse::Product),
        }
    }
}

/// [`CatalogService`] over the catalog HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalog<T> {
    transport: T,
}

impl HttpCatalog<FetchClient> {
    pub fn from_config(config: &CatalogConfig) -> Result<Self, FetchError> {
        Ok(Self::new(FetchClient::new(config)?))
    }
}

impl<T: Transport> HttpCatalog<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch a slug-scoped resource and return its envelope data.
    async fn fetch_for_slug(&self, slug: &Slug, suffix: &str) -> CatalogResult<Value> {
        if !slug.is_url_safe() {
            tracing::warn!(%slug, "rejecting slug that cannot name a catalog product");
            return Err(CatalogError::not_found(slug.as_str(), None));
        }

        let path = format!("/products/{}{}", slug, suffix);
        let response = self.transport.get(&path, &[]).await?;

        if response.is_not_found() {
            let message = ApiEnvelope::from_slice(&response.body)
                .ok()
                .and_then(|env| env.failure_message().map(str::to_string));
            tracing::warn!(%slug, status = response.status, "product not found");
            return Err(CatalogError::not_found(slug.as_str(), message.as_deref()));
        }

        let envelope = decode_envelope(response)?;
        if !envelope.success {
            tracing::warn!(%slug, message = ?envelope.failure_message(), "product lookup failed");
            return Err(CatalogError::not_found(slug.as_str(), envelope.failure_message()));
        }
        Ok(envelope.into_data()?)
    }
}

/// Non-2xx responses become [`FetchError::Http`] carrying the envelope's
/// failure message when there is one, the raw body otherwise.
fn decode_envelope(response: TransportResponse) -> Result<ApiEnvelope, FetchError> {
    if !response.is_success() {
        let body = ApiEnvelope::from_slice(&response.body)
            .ok()
            .and_then(|env| env.failure_message().map(str::to_string))
            .unwrap_or_else(|| response.text());
        return Err(FetchError::Http {
            status: response.status,
            body,
        });
    }
    ApiEnvelope::from_slice(&response.body)
        .inspect_err(|e| tracing::error!(error = %e, body = %response.text(), "undecodable catalog response"))
}

#[async_trait]
impl<T: Transport> CatalogService for HttpCatalog<T> {
    async fn list_products(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
        let response = self.transport.get("/products", &query.to_params()).await?;
        let envelope = decode_envelope(response)?;
        if !envelope.success {
            tracing::warn!(message = ?envelope.failure_message(), "product listing failed");
            return Err(CatalogError::response(envelope.failure_message()));
        }

        let count = envelope.count;
        let raw: Vec<RawProduct> = decode_list(envelope.into_data()?, "products")?;
        let products = raw
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| tracing::warn!(error = %e, "catalog listing contains a malformed product"))?;

        if let Some(count) = count.filter(|c| *c != products.len() as u64) {
            tracing::debug!(count, received = products.len(), "listing count differs from payload");
        }
        tracing::debug!(?query, products = products.len(), "listed products");
        Ok(products)
    }

    async fn get_product_by_slug(&self, slug: &Slug) -> CatalogResult<Product> {
        let data = self.fetch_for_slug(slug, "").await?;
        let raw: RawProduct = decode_item(data, slug.as_str())?;
        let product = Product::try_from(raw)
            .inspect_err(|e| tracing::warn!(%slug, error = %e, "malformed product"))?;
        Ok(product)
    }

    async fn get_variants(&self, slug: &Slug) -> CatalogResult<Vec<ProductVariant>> {
        let data = self.fetch_for_slug(slug, "/variants").await?;
        let raw: Vec<RawVariant> = decode_list(data, slug.as_str())?;
        Ok(validate_variants(slug, raw)?)
    }

    async fn get_emi_plans(&self, slug: &Slug) -> CatalogResult<Vec<EmiPlan>> {
        let data = self.fetch_for_slug(slug, "/emi-plans").await?;
        let raw: Vec<RawEmiPlan> = decode_list(data, slug.as_str())?;
        Ok(validate_plans(slug, raw)?)
    }

    async fn health(&self) -> CatalogResult<Value> {
        let response = self.transport.get("/health", &[]).await?.error_for_status()?;
        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emistore_commerce::pricing::lowest_monthly_amount;
    use emistore_commerce::selection::Selection;
    use emistore_commerce::{Money, PlanId, VariantId};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned responses keyed by path; records every request.
    #[derive(Default)]
    struct StubTransport {
        routes: HashMap<String, Result<TransportResponse, fn() -> FetchError>>,
        requests: Mutex<Vec<(String, Vec<(&'static str, String)>)>>,
    }

    impl StubTransport {
        fn respond(mut self, path: &str, status: u16, body: Value) -> Self {
            self.routes.insert(
                path.to_string(),
                Ok(TransportResponse::new(status, body.to_string())),
            );
            self
        }

        fn respond_raw(mut self, path: &str, status: u16, body: &str) -> Self {
            self.routes
                .insert(path.to_string(), Ok(TransportResponse::new(status, body)));
            self
        }

        fn fail(mut self, path: &str, error: fn() -> FetchError) -> Self {
            self.routes.insert(path.to_string(), Err(error));
            self
        }

        fn requests(&self) -> Vec<(String, Vec<(&'static str, String)>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn get(
            &self,
            path: &str,
            query: &[(&'static str, String)],
        ) -> Result<TransportResponse, FetchError> {
            self.requests
                .lock()
                .unwrap()
                .push((path.to_string(), query.to_vec()));
            match self.routes.get(path) {
                Some(Ok(response)) => Ok(response.clone()),
                Some(Err(error)) => Err(error()),
                None => Ok(TransportResponse::new(404, "")),
            }
        }
    }

    fn phone(slug: &str) -> Value {
        json!({
            "_id": format!("doc-{slug}"),
            "name": "Phone A",
            "slug": slug,
            "brand": "Acme",
            "category": "smartphones",
            "description": "A phone",
            "specifications": { "Display": "6.1 inch" },
            "variants": [
                { "id": "v1", "name": "128GB Black", "storage": "128GB", "color": "Black",
                  "colorCode": "#000000", "price": 69999, "originalPrice": 79999,
                  "image": "https://cdn.example.com/v1.png", "inStock": true },
                { "id": "v2", "name": "256GB Blue", "storage": "256GB", "color": "Blue",
                  "colorCode": "#0000ff", "price": 79999, "originalPrice": 89999,
                  "image": "https://cdn.example.com/v2.png", "inStock": false }
            ],
            "emiPlans": [
                { "id": "p6", "monthlyAmount": 2000, "tenure": 6, "interestRate": 12.0 },
                { "id": "p12", "monthlyAmount": 1200, "tenure": 12, "interestRate": 0.0,
                  "cashback": 2000 }
            ],
            "rating": 4.5,
            "reviewCount": 120,
            "isActive": true
        })
    }

    fn ok(data: Value) -> Value {
        json!({ "success": true, "data": data })
    }

    #[tokio::test]
    async fn test_list_then_load() {
        let stub = StubTransport::default()
            .respond("/products", 200, json!({ "success": true, "data": [phone("phone-a")], "count": 1 }));
        let catalog = HttpCatalog::new(stub);

        let products = catalog.list_products(&ProductQuery::new()).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(lowest_monthly_amount(&products[0]).unwrap(), Money::new(1200));

        let mut selection = Selection::new();
        selection.load(products[0].clone());
        assert_eq!(selection.selected_variant_id(), Some(&VariantId::new("v1")));
        assert_eq!(selection.selected_plan_id(), Some(&PlanId::new("p6")));
        assert!(selection.can_proceed());
    }

    #[tokio::test]
    async fn test_list_sends_only_set_params() {
        let catalog = HttpCatalog::new(
            StubTransport::default().respond("/products", 200, ok(json!([]))),
        );
        let query = ProductQuery::new().with_category("smartphones").with_limit(5);
        assert!(catalog.list_products(&query).await.unwrap().is_empty());

        let requests = catalog.transport().requests();
        assert_eq!(
            requests[0].1,
            vec![("category", "smartphones".to_string()), ("limit", "5".to_string())]
        );
    }

    #[tokio::test]
    async fn test_list_envelope_failure() {
        let catalog = HttpCatalog::new(
            StubTransport::default()
                .respond("/products", 200, json!({ "success": false, "error": "db down" })),
        );
        let err = catalog.list_products(&ProductQuery::new()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Response { ref message } if message == "db down"));

        let catalog = HttpCatalog::new(
            StubTransport::default().respond("/products", 200, json!({ "success": false })),
        );
        let err = catalog.list_products(&ProductQuery::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch products");
    }

    #[tokio::test]
    async fn test_list_with_malformed_product_fails() {
        let mut broken = phone("phone-b");
        broken["variants"] = json!([]);
        let catalog = HttpCatalog::new(
            StubTransport::default().respond("/products", 200, ok(json!([phone("phone-a"), broken]))),
        );
        let err = catalog.list_products(&ProductQuery::new()).await.unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("phone-b"));
    }

    #[tokio::test]
    async fn test_transport_failures_are_unavailable() {
        let catalog = HttpCatalog::new(
            StubTransport::default()
                .fail("/products", || FetchError::Timeout)
                .respond("/products/phone-a", 500, json!({ "success": false, "message": "boom" }))
                .respond_raw("/health", 200, "not json"),
        );
        assert!(catalog.list_products(&ProductQuery::new()).await.unwrap_err().is_unavailable());
        assert!(catalog
            .get_product_by_slug(&Slug::new("phone-a"))
            .await
            .unwrap_err()
            .is_unavailable());
        assert!(catalog.health().await.unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn test_http_error_carries_envelope_message() {
        let catalog = HttpCatalog::new(
            StubTransport::default()
                .respond("/products", 500, json!({ "success": false, "message": "Internal server error" }))
                .respond_raw("/products/phone-a", 502, "<html>bad gateway</html>"),
        );

        let err = catalog.list_products(&ProductQuery::new()).await.unwrap_err();
        assert!(err.is_unavailable());
        assert!(matches!(
            &err,
            CatalogError::Unavailable(FetchError::Http { status: 500, body }) if body == "Internal server error"
        ));
        assert!(err.to_string().contains("HTTP 500: Internal server error"));

        let err = catalog.get_product_by_slug(&Slug::new("phone-a")).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Unavailable(FetchError::Http { status: 502, ref body }) if body == "<html>bad gateway</html>"
        ));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let catalog = HttpCatalog::new(
            StubTransport::default()
                .respond("/products/missing", 200, json!({ "success": false, "message": "not found" }))
                .respond("/products/gone", 404, json!({ "success": false, "message": "Product not found" })),
        );

        let err = catalog.get_product_by_slug(&Slug::new("missing")).await.unwrap_err();
        match err {
            CatalogError::ProductNotFound { slug, message } => {
                assert_eq!(slug, "missing");
                assert_eq!(message, "not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = catalog.get_product_by_slug(&Slug::new("gone")).await.unwrap_err();
        assert!(err.is_not_found());

        // No route at all: bare 404 uses the default message.
        let err = catalog.get_product_by_slug(&Slug::new("nothing")).await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found");
    }

    #[tokio::test]
    async fn test_unsafe_slug_is_not_requested() {
        let catalog = HttpCatalog::new(StubTransport::default());
        let err = catalog.get_product_by_slug(&Slug::new("../admin")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(catalog.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_product_and_sub_resources() {
        let product = phone("phone-a");
        let catalog = HttpCatalog::new(
            StubTransport::default()
                .respond("/products/phone-a", 200, ok(product.clone()))
                .respond("/products/phone-a/variants", 200, ok(product["variants"].clone()))
                .respond("/products/phone-a/emi-plans", 200, ok(product["emiPlans"].clone())),
        );
        let slug = Slug::new("phone-a");

        let product = catalog.get_product_by_slug(&slug).await.unwrap();
        assert_eq!(product.id().as_str(), "doc-phone-a");

        let variants = catalog.get_variants(&slug).await.unwrap();
        assert_eq!(variants.len(), 2);
        assert!(!variants[1].in_stock());

        let plans = catalog.get_emi_plans(&slug).await.unwrap();
        assert_eq!(plans[1].cashback(), Some(Money::new(2000)));
    }

    #[tokio::test]
    async fn test_empty_plan_list_is_malformed() {
        let catalog = HttpCatalog::new(
            StubTransport::default().respond("/products/phone-a/emi-plans", 200, ok(json!([]))),
        );
        let err = catalog.get_emi_plans(&Slug::new("phone-a")).await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_reload_reissues_request() {
        let catalog = HttpCatalog::new(
            StubTransport::default().respond("/products/phone-a", 200, ok(phone("phone-a"))),
        );
        let request = CatalogRequest::Product(Slug::new("phone-a"));

        let first = catalog.reload(&request).await.unwrap();
        let second = catalog.reload(&request).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.into_product().unwrap().slug().as_str(), "phone-a");
        assert_eq!(catalog.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_health_returns_body() {
        let catalog = HttpCatalog::new(
            StubTransport::default().respond("/health", 200, json!({ "status": "OK" })),
        );
        assert_eq!(catalog.health().await.unwrap()["status"], "OK");
    }
}
