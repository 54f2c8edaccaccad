//! # REST Routes
//!
//! Router assembly.

use crate::api::rest::auth::require_token;
use crate::api::rest::handlers::{AppState, health, search_products};
use axum::Router;
use axum::http::{Method, header};
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Creates the REST router.
///
/// `/api/v1/products` requires an authorized bearer token;
/// `/api/v1/health` is public.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/v1/products", get(search_products))
        .route_layer(middleware::from_fn_with_state(Arc::clone(&state), require_token));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/api/v1/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
