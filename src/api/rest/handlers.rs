//! # REST Handlers
//!
//! Request handlers, shared state, and the error envelope.

use crate::api::rest::auth::{AuthError, JwtVerifier};
use crate::application::error::ApplicationError;
use crate::application::services::{FieldSortPolicy, ProductAggregator};
use crate::config::AppConfig;
use crate::domain::entities::{ProductAggregate, ProductFilter};
use crate::domain::value_objects::{SortDirection, Source};
use crate::infrastructure::sources::SourceRegistry;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Application State
// ============================================================================

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Aggregation engine.
    pub aggregator: ProductAggregator,
    /// Token verifier.
    pub auth: JwtVerifier,
    /// Upper bound on one product search.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates the state.
    #[must_use]
    pub fn new(aggregator: ProductAggregator, auth: JwtVerifier, request_timeout: Duration) -> Self {
        Self {
            aggregator,
            auth,
            request_timeout,
        }
    }

    /// Wires the state from configuration around an already built registry.
    #[must_use]
    pub fn from_config(config: &AppConfig, registry: SourceRegistry) -> Self {
        let aggregator = ProductAggregator::new(
            Arc::new(registry),
            Arc::new(FieldSortPolicy::new(config.aggregation.sort_key)),
            config.aggregation.engine_config(),
        );
        let auth = JwtVerifier::new(&config.auth.jwt_secret, config.auth.required_scope.clone());
        Self::new(
            aggregator,
            auth,
            Duration::from_millis(config.server.request_timeout_ms),
        )
    }
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

/// Query parameters of the product search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQueryParams {
    /// Free-text query.
    pub query: Option<String>,
    /// `ASC` or `DESC`; defaults to `ASC`.
    pub sort: Option<String>,
}

/// Error envelope returned for every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Request path.
    pub path: String,
    /// Error detail.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `UP` while the server is serving.
    pub status: String,
    /// Registered sources.
    pub sources: Vec<Source>,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Errors
// ============================================================================

/// HTTP error carrying a status and the error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    /// Creates an error with the given status.
    #[must_use]
    pub fn new(status: StatusCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                path: path.into(),
                message: message.into(),
            },
        }
    }

    /// 422 for input that could not be turned into a filter.
    #[must_use]
    pub fn unprocessable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, path, message)
    }

    /// 408 for a search that ran past the request timeout.
    #[must_use]
    pub fn timeout(path: impl Into<String>, after: Duration) -> Self {
        Self::new(
            StatusCode::REQUEST_TIMEOUT,
            path,
            format!("Request timed out after {}ms", after.as_millis()),
        )
    }

    /// Maps an application error: invalid input is 422, not found is 404.
    #[must_use]
    pub fn from_application(path: impl Into<String>, error: ApplicationError) -> Self {
        let status = match error {
            ApplicationError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        Self::new(status, path, error.message())
    }

    /// Maps an authentication error: scope failures are 403, the rest 401.
    #[must_use]
    pub fn from_auth(path: impl Into<String>, error: &AuthError) -> Self {
        let status = match error {
            AuthError::MissingScope(_) => StatusCode::FORBIDDEN,
            AuthError::MissingToken | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
        };
        Self::new(status, path, error.to_string())
    }

    /// Returns the HTTP status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the envelope.
    #[must_use]
    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/v1/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        sources: state.aggregator.registry().sources(),
        timestamp: Utc::now(),
    })
}

/// `GET /api/v1/products?query=<q>&sort=<ASC|DESC>`
///
/// # Errors
///
/// Returns 422 for a missing or invalid query or sort, 404 when no source
/// produced a product, and 408 when the search outlives the request timeout.
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<ProductQueryParams>, QueryRejection>,
) -> Result<Json<ProductAggregate>, ApiError> {
    let path = uri.path();
    let Query(params) =
        params.map_err(|rejection| ApiError::unprocessable(path, format!("INVALID: {rejection}")))?;

    let sort = match params.sort.as_deref() {
        Some(raw) => raw
            .parse::<SortDirection>()
            .map_err(|e| ApiError::unprocessable(path, format!("INVALID: {e}")))?,
        None => SortDirection::default(),
    };
    let filter = ProductFilter::new(params.query.unwrap_or_default(), sort);

    match tokio::time::timeout(state.request_timeout, state.aggregator.aggregate(&filter)).await {
        Ok(Ok(aggregate)) => Ok(Json(aggregate)),
        Ok(Err(error)) => Err(ApiError::from_application(path, error)),
        Err(_) => {
            tracing::warn!(%filter, timeout = ?state.request_timeout, "search timed out");
            Err(ApiError::timeout(path, state.request_timeout))
        }
    }
}
