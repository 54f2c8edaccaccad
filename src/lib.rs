//! # Product Composite
//!
//! Aggregates product search results from several marketplace APIs into a
//! single, normalized, sorted result set.
//!
//! ## Layers
//!
//! - [`domain`]: products, filters and the value objects they are built from
//! - [`application`]: the [`ProductAggregator`] fan-out/fan-in engine and sort policies
//! - [`infrastructure`]: marketplace clients, mappers and the source registry
//! - [`api`]: the REST surface (axum) with bearer-token authorization
//! - [`config`]: layered configuration loading
//! - [`telemetry`]: tracing subscriber setup
//!
//! ## Flow
//!
//! ```text
//! GET /api/v1/products ─► auth ─► ProductFilter ─► ProductAggregator
//!                                                   ├─► Tiki   ─► map ─┐
//!                                                   ├─► Shopee ─► map ─┼─► sort ─► ProductAggregate
//!                                                   └─► Lazada ─► map ─┘
//! ```
//!
//! [`ProductAggregator`]: application::services::ProductAggregator

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
