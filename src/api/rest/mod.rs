//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! ## Products
//! - `GET /api/v1/products?query=<q>&sort=<ASC|DESC>` - Search every marketplace
//!   (bearer token with the `product:read` scope)
//!
//! ## Health
//! - `GET /api/v1/health` - Health check endpoint
//!
//! # Errors
//!
//! Every rejection answers `{"path": ..., "message": ...}`:
//!
//! | Status | Cause |
//! |--------|-------|
//! | 401 | missing, invalid or expired token |
//! | 403 | token without the required scope |
//! | 404 | no source produced a product |
//! | 408 | search outlived the request timeout |
//! | 422 | missing or invalid query, unknown sort |
//!
//! # Usage
//!
//! ```ignore
//! use product_composite::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::from_config(&config, registry));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{AuthError, Claims, JwtVerifier};
pub use handlers::{ApiError, AppState, ErrorResponse, HealthResponse, ProductQueryParams};
pub use routes::create_router;
