//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`ProductAggregator`]: Concurrent product collection across sources
//! - [`SortPolicy`]: Strategies for ordering the aggregated products

pub mod product_aggregation;
pub mod sort_policy;

pub use product_aggregation::{AggregationConfig, AggregationReport, ProductAggregator};
pub use sort_policy::{FieldSortPolicy, SortPolicy};
