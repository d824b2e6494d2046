//! End-to-end catalog client tests against an in-process mock catalog.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use emistore_commerce::listing::{CategoryFilter, ProductQuery};
use emistore_commerce::pricing::lowest_monthly_amount;
use emistore_commerce::{Money, Slug};
use emistore_data::{CatalogConfig, CatalogError, CatalogService, FetchError, HttpCatalog};

/// Mock catalog API on a random port, mounted under `/api`.
struct MockCatalog {
    addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl MockCatalog {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog");
        let addr = listener.local_addr().expect("Failed to get local address");

        let api = Router::new()
            .route("/products", get(list_products))
            .route("/products/:slug", get(get_product))
            .route("/products/:slug/variants", get(get_variants))
            .route("/products/:slug/emi-plans", get(get_emi_plans))
            .route("/health", get(health));
        let app = Router::new().nest("/api", api);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock catalog failed");
        });

        Self {
            addr,
            _handle: handle,
        }
    }

    fn url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    fn catalog(&self) -> HttpCatalog<emistore_data::FetchClient> {
        HttpCatalog::from_config(&CatalogConfig::new(self.url()).with_timeout_secs(1))
            .expect("client")
    }
}

fn phone(slug: &str, category: &str) -> Value {
    json!({
        "_id": format!("doc-{slug}"),
        "name": format!("Phone {slug}"),
        "slug": slug,
        "brand": "Acme",
        "category": category,
        "description": "A phone",
        "specifications": { "Display": "6.1 inch", "Battery": "4000 mAh" },
        "variants": [
            { "id": "v1", "name": "128GB Black", "storage": "128GB", "color": "Black",
              "colorCode": "#000000", "price": 69999, "originalPrice": 79999,
              "image": "https://cdn.example.com/v1.png", "inStock": true },
            { "id": "v2", "name": "256GB Silver", "storage": "256GB", "color": "Silver",
              "colorCode": "#c0c0c0", "price": 79999, "originalPrice": 89999,
              "image": "https://cdn.example.com/v2.png", "inStock": true }
        ],
        "emiPlans": [
            { "id": "p6", "monthlyAmount": 2000, "tenure": 6, "interestRate": 10.5 },
            { "id": "p12", "monthlyAmount": 1200, "tenure": 12, "interestRate": 0.0 }
        ],
        "rating": 4.4,
        "reviewCount": 87,
        "isActive": true,
        "createdAt": "2024-01-01T00:00:00.000Z"
    })
}

fn catalog_data() -> Vec<Value> {
    vec![phone("phone-a", "smartphones"), phone("tab-a", "tablets")]
}

async fn list_products(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let products: Vec<Value> = catalog_data()
        .into_iter()
        .filter(|p| params.get("category").map_or(true, |c| p["category"] == c.as_str()))
        .collect();
    Json(json!({ "success": true, "data": products, "count": products.len() }))
}

async fn get_product(Path(slug): Path<String>) -> (StatusCode, Json<Value>) {
    match slug.as_str() {
        "missing" => (
            StatusCode::OK,
            Json(json!({ "success": false, "message": "not found" })),
        ),
        "broken" => {
            let mut product = phone("broken", "smartphones");
            product["variants"] = json!([]);
            (StatusCode::OK, Json(json!({ "success": true, "data": product })))
        }
        "flaky" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "Internal server error" })),
        ),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            (StatusCode::OK, Json(json!({ "success": true, "data": phone("slow", "smartphones") })))
        }
        _ => match catalog_data().into_iter().find(|p| p["slug"] == slug.as_str()) {
            Some(product) => (StatusCode::OK, Json(json!({ "success": true, "data": product }))),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "message": "Product not found" })),
            ),
        },
    }
}

async fn get_variants(Path(slug): Path<String>) -> Json<Value> {
    let product = phone(&slug, "smartphones");
    Json(json!({ "success": true, "data": product["variants"] }))
}

async fn get_emi_plans(Path(slug): Path<String>) -> Json<Value> {
    let product = phone(&slug, "smartphones");
    Json(json!({ "success": true, "data": product["emiPlans"] }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "Server is running" }))
}

#[tokio::test]
async fn test_list_and_filter() {
    let server = MockCatalog::start().await;
    let catalog = server.catalog();

    let all = catalog.list_products(&CategoryFilter::All.to_query()).await.unwrap();
    assert_eq!(all.len(), 2);

    let phones = catalog
        .list_products(&CategoryFilter::from_value("smartphones").to_query())
        .await
        .unwrap();
    assert_eq!(phones.len(), 1);
    assert_eq!(phones[0].slug().as_str(), "phone-a");
    assert_eq!(lowest_monthly_amount(&phones[0]).unwrap(), Money::new(1200));

    let none = catalog
        .list_products(&ProductQuery::new().with_category("laptops"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_product_lookup() {
    let server = MockCatalog::start().await;
    let catalog = server.catalog();

    let product = catalog.get_product_by_slug(&Slug::new("phone-a")).await.unwrap();
    assert_eq!(product.variants().len(), 2);
    assert_eq!(product.created_at(), Some("2024-01-01T00:00:00.000Z"));

    let variants = catalog.get_variants(&Slug::new("phone-a")).await.unwrap();
    assert_eq!(variants[0].id().as_str(), "v1");

    let plans = catalog.get_emi_plans(&Slug::new("phone-a")).await.unwrap();
    assert_eq!(plans.len(), 2);
}

#[tokio::test]
async fn test_missing_product() {
    let server = MockCatalog::start().await;
    let catalog = server.catalog();

    match catalog.get_product_by_slug(&Slug::new("missing")).await {
        Err(CatalogError::ProductNotFound { message, .. }) => assert_eq!(message, "not found"),
        other => panic!("expected ProductNotFound, got {other:?}"),
    }

    let err = catalog.get_product_by_slug(&Slug::new("no-such-phone")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_malformed_and_server_errors() {
    let server = MockCatalog::start().await;
    let catalog = server.catalog();

    let err = catalog.get_product_by_slug(&Slug::new("broken")).await.unwrap_err();
    assert!(err.is_malformed());

    let err = catalog.get_product_by_slug(&Slug::new("flaky")).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Unavailable(FetchError::Http { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let server = MockCatalog::start().await;
    let catalog = server.catalog();

    let err = catalog.get_product_by_slug(&Slug::new("slow")).await.unwrap_err();
    assert!(matches!(err, CatalogError::Unavailable(FetchError::Timeout)));
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let catalog =
        HttpCatalog::from_config(&CatalogConfig::new(format!("http://{addr}/api"))).unwrap();
    let err = catalog.list_products(&ProductQuery::new()).await.unwrap_err();
    assert!(err.is_unavailable());

    let err = catalog.health().await.unwrap_err();
    assert!(matches!(err, CatalogError::Unavailable(FetchError::Connection(_))));
}

#[tokio::test]
async fn test_health() {
    let server = MockCatalog::start().await;
    let body = server.catalog().health().await.unwrap();
    assert_eq!(body["status"], "OK");
}
