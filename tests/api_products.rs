//! Black-box tests for the product search API.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; sources
//! are either in-memory stubs or `wiremock` servers behind the real HTTP
//! clients.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use product_composite::api::rest::{AppState, Claims, ErrorResponse, JwtVerifier, create_router};
use product_composite::application::services::{
    AggregationConfig, FieldSortPolicy, ProductAggregator,
};
use product_composite::config::AppConfig;
use product_composite::domain::entities::{Product, ProductBuilder, ProductFilter};
use product_composite::domain::value_objects::{Price, Source};
use product_composite::infrastructure::sources::{
    SourceAdapter, SourceBatch, SourceError, SourceRegistry, SourceResult, build_registry,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "black-box-secret";
const SCOPE: &str = "product:read";

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone)]
enum Outcome {
    Products(Vec<(String, f64)>),
    Fail,
    Slow(u64),
}

#[derive(Debug)]
struct StubSource {
    source: Source,
    outcome: Outcome,
}

impl StubSource {
    fn one(source: Source, code: &str, price: f64) -> Self {
        Self {
            source,
            outcome: Outcome::Products(vec![(code.to_string(), price)]),
        }
    }

    fn empty(source: Source) -> Self {
        Self {
            source,
            outcome: Outcome::Products(vec![]),
        }
    }

    fn failing(source: Source) -> Self {
        Self {
            source,
            outcome: Outcome::Fail,
        }
    }

    fn slow(source: Source, delay_ms: u64) -> Self {
        Self {
            source,
            outcome: Outcome::Slow(delay_ms),
        }
    }

    fn product(&self, code: &str, price: f64) -> Product {
        ProductBuilder::new(code, "Apple iPhone 12", self.source)
            .price(Price::new(price).unwrap())
            .image("https://img.example.com/iphone.jpg")
            .build()
            .unwrap()
    }
}

#[async_trait]
impl SourceAdapter for StubSource {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch_products(&self, _filter: &ProductFilter) -> SourceResult<SourceBatch> {
        match &self.outcome {
            Outcome::Products(items) => Ok(SourceBatch::new(
                items
                    .iter()
                    .map(|(code, price)| self.product(code, *price))
                    .collect(),
            )),
            Outcome::Fail => Err(SourceError::unavailable(self.source, "connection refused")),
            Outcome::Slow(delay_ms) => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(SourceBatch::new(vec![self.product("slow-1", 1.0)]))
            }
        }
    }
}

fn app_with(sources: Vec<StubSource>, request_timeout: Duration) -> Router {
    let mut registry = SourceRegistry::new();
    for source in sources {
        registry.register(source).unwrap();
    }
    let aggregator = ProductAggregator::new(
        Arc::new(registry),
        Arc::new(FieldSortPolicy::default()),
        AggregationConfig::with_per_source_timeout(5000),
    );
    let state = AppState::new(aggregator, JwtVerifier::new(SECRET, SCOPE), request_timeout);
    create_router(Arc::new(state))
}

fn app(sources: Vec<StubSource>) -> Router {
    app_with(sources, Duration::from_secs(5))
}

fn three_sources() -> Vec<StubSource> {
    vec![
        StubSource::one(Source::Tiki, "tiki-1", 15_990_000.0),
        StubSource::one(Source::Shopee, "shopee-1", 15_490_000.0),
        StubSource::one(Source::Lazada, "lazada-1", 16_200_000.0),
    ]
}

fn mint_jwt(scope: &str) -> String {
    let exp = u64::try_from((chrono::Utc::now() + chrono::Duration::minutes(10)).timestamp())
        .unwrap();
    let claims = Claims {
        sub: "black-box".into(),
        scope: scope.into(),
        exp,
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn search(app: Router, uri: &str) -> (StatusCode, Value) {
    let token = mint_jwt(SCOPE);
    send(app, get(uri, Some(&token))).await
}

fn envelope(body: Value) -> ErrorResponse {
    serde_json::from_value(body).unwrap()
}

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn iphone_returns_one_product_per_source() {
    let (status, body) = search(app(three_sources()), "/api/v1/products?query=iphone&sort=ASC").await;

    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 3);
    for product in products {
        assert!(!product["code"].as_str().unwrap().is_empty());
        assert!(!product["name"].as_str().unwrap().is_empty());
        assert!(!product["source"].as_str().unwrap().is_empty());
    }
    let sources: Vec<&str> = products.iter().map(|p| p["source"].as_str().unwrap()).collect();
    assert_eq!(sources, vec!["SHOPEE", "TIKI", "LAZADA"]);
}

#[tokio::test]
async fn product_json_shape() {
    let (status, body) = search(
        app(vec![StubSource::one(Source::Tiki, "tiki-1", 199.5)]),
        "/api/v1/products?query=iphone",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let product = &body["products"][0];
    assert_eq!(product["code"], "tiki-1");
    assert_eq!(product["price"], json!(199.5));
    assert_eq!(product["discountRate"], json!(0.0));
    assert_eq!(product["source"], "TIKI");
    assert!(product["promotion"].is_null());
}

#[tokio::test]
async fn missing_sort_defaults_to_ascending() {
    let (status, body) = search(app(three_sources()), "/api/v1/products?query=iphone").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["code"], "shopee-1");
}

#[tokio::test]
async fn descending_sort() {
    let (status, body) =
        search(app(three_sources()), "/api/v1/products?query=iphone&sort=desc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["code"], "lazada-1");
    assert_eq!(body["products"][2]["code"], "shopee-1");
}

#[tokio::test]
async fn partial_failure_still_answers() {
    let sources = vec![
        StubSource::failing(Source::Tiki),
        StubSource::failing(Source::Shopee),
        StubSource {
            source: Source::Lazada,
            outcome: Outcome::Products(vec![("l-1".into(), 2.0), ("l-2".into(), 1.0)]),
        },
    ];
    let (status, body) = search(app(sources), "/api/v1/products?query=iphone").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn no_product_found_is_404_with_envelope() {
    let sources = vec![
        StubSource::failing(Source::Tiki),
        StubSource::empty(Source::Shopee),
        StubSource::failing(Source::Lazada),
    ];
    let (status, body) = search(
        app(sources),
        "/api/v1/products?query=iphone%2012%20000000&sort=ASC",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error = envelope(body);
    assert_eq!(error.path, "/api/v1/products");
    assert_eq!(error.message, "No product found for query: iphone 12 000000");
}

#[tokio::test]
async fn empty_query_is_422() {
    let (status, body) = search(app(three_sources()), "/api/v1/products?query=&sort=ASC").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error = envelope(body);
    assert_eq!(error.path, "/api/v1/products");
    assert_eq!(error.message, "INVALID: ProductFilter(query=\"\", sort=ASC)");
}

#[tokio::test]
async fn missing_query_is_422() {
    let (status, body) = search(app(three_sources()), "/api/v1/products").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(envelope(body).message.starts_with("INVALID: "));
}

#[tokio::test]
async fn unknown_sort_is_422() {
    let (status, body) =
        search(app(three_sources()), "/api/v1/products?query=iphone&sort=sideways").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(envelope(body).message.contains("sideways"));
}

#[tokio::test]
async fn slow_search_is_408() {
    let app = app_with(
        vec![StubSource::slow(Source::Tiki, 500)],
        Duration::from_millis(50),
    );
    let (status, body) = search(app, "/api/v1/products?query=iphone").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    let error = envelope(body);
    assert_eq!(error.path, "/api/v1/products");
    assert_eq!(error.message, "Request timed out after 50ms");
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn missing_token_is_401() {
    let (status, body) = send(app(three_sources()), get("/api/v1/products?query=iphone", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(envelope(body).path, "/api/v1/products");
}

#[tokio::test]
async fn invalid_token_is_401() {
    let (status, _) = send(
        app(three_sources()),
        get("/api/v1/products?query=iphone", Some("not.a.jwt")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_without_scope_is_403() {
    let token = mint_jwt("openid profile");
    let (status, body) = send(
        app(three_sources()),
        get("/api/v1/products?query=iphone", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(envelope(body).message.contains(SCOPE));
}

#[tokio::test]
async fn unauthorized_request_is_rejected_before_validation() {
    let (status, _) = send(app(three_sources()), get("/api/v1/products?query=", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let (status, body) = send(app(three_sources()), get("/api/v1/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["sources"], json!(["TIKI", "SHOPEE", "LAZADA"]));
}

// ============================================================================
// Full stack
// ============================================================================

#[tokio::test]
async fn full_stack_against_marketplace_servers() {
    let tiki = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/products"))
        .and(query_param("q", "iphone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "sku": "TK-1", "name": "iPhone 12", "price": 300},
                {"id": 2, "name": "iPhone 12 (no price)"}
            ]
        })))
        .mount(&tiki)
        .await;

    let shopee = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/search/search_items"))
        .and(query_param("keyword", "iphone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"item_basic": {"itemid": 7, "shopid": 9, "name": "iPhone 12", "price": 10_000_000}}]
        })))
        .mount(&shopee)
        .await;

    let lazada = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&lazada)
        .await;

    let config = AppConfig::from_toml(&format!(
        r#"
        [auth]
        jwt_secret = "{SECRET}"

        [sources.tiki]
        base_url = "{}"

        [sources.shopee]
        base_url = "{}"

        [sources.lazada]
        base_url = "{}"
        "#,
        tiki.uri(),
        shopee.uri(),
        lazada.uri()
    ))
    .unwrap();

    let registry = build_registry(&config.sources).unwrap();
    let app = create_router(Arc::new(AppState::from_config(&config, registry)));

    let (status, body) = search(app, "/api/v1/products?query=iphone&sort=ASC").await;

    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["code"], "9.7");
    assert_eq!(products[0]["price"], json!(100.0));
    assert_eq!(products[1]["code"], "TK-1");
}
