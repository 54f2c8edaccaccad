//! # Product Aggregation Engine
//!
//! Orchestrates product collection across marketplaces.
//!
//! This module provides the [`ProductAggregator`] which validates a
//! [`ProductFilter`], queries every registered source concurrently, absorbs
//! source and record failures, and orders the surviving products with a
//! [`SortPolicy`].
//!
//! # Failure policy
//!
//! - Invalid filter: [`ApplicationError::InvalidInput`], no source is called
//! - Source unavailable or timed out: the source contributes nothing
//! - Malformed record: the record is dropped
//! - No surviving product: [`ApplicationError::NotFound`]
//!
//! Dropping the future returned by [`ProductAggregator::aggregate`] cancels
//! every source call still in flight.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::sort_policy::{FieldSortPolicy, SortPolicy};
use crate::domain::entities::{ProductAggregate, ProductFilter};
use crate::domain::value_objects::Source;
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::registry::SourceRegistry;
use crate::infrastructure::sources::traits::SourceBatch;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

/// Configuration for product aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Per-source timeout in milliseconds.
    pub per_source_timeout_ms: u64,
    /// Maximum number of products to return.
    pub max_products: Option<usize>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            per_source_timeout_ms: 5000,
            max_products: None,
        }
    }
}

impl AggregationConfig {
    /// Creates a new configuration with the specified per-source timeout.
    #[must_use]
    pub fn with_per_source_timeout(timeout_ms: u64) -> Self {
        Self {
            per_source_timeout_ms: timeout_ms,
            ..Default::default()
        }
    }

    /// Sets the maximum number of products to return.
    #[must_use]
    pub fn with_max_products(mut self, max: usize) -> Self {
        self.max_products = Some(max);
        self
    }
}

/// Result of one aggregation with collection diagnostics.
#[derive(Debug, Clone)]
pub struct AggregationReport {
    /// The ordered products.
    pub aggregate: ProductAggregate,
    /// Number of sources queried.
    pub sources_queried: usize,
    /// Number of sources that answered.
    pub sources_responded: usize,
    /// Source-local failures that were absorbed.
    pub failures: Vec<SourceError>,
    /// Records dropped as malformed across all sources.
    pub records_dropped: usize,
}

impl AggregationReport {
    /// Returns the sources that failed.
    #[must_use]
    pub fn failed_sources(&self) -> Vec<Source> {
        self.failures.iter().map(SourceError::origin).collect()
    }

    /// Returns true if every queried source answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Engine collecting and ordering products from every registered source.
#[derive(Debug, Clone)]
pub struct ProductAggregator {
    registry: Arc<SourceRegistry>,
    sort_policy: Arc<dyn SortPolicy>,
    config: AggregationConfig,
}

impl ProductAggregator {
    /// Creates a new ProductAggregator.
    #[must_use]
    pub fn new(
        registry: Arc<SourceRegistry>,
        sort_policy: Arc<dyn SortPolicy>,
        config: AggregationConfig,
    ) -> Self {
        Self {
            registry,
            sort_policy,
            config,
        }
    }

    /// Creates an aggregator sorting by price with default configuration.
    #[must_use]
    pub fn with_defaults(registry: Arc<SourceRegistry>) -> Self {
        Self::new(
            registry,
            Arc::new(FieldSortPolicy::default()),
            AggregationConfig::default(),
        )
    }

    /// Collects products for the filter from every source.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidInput` if the filter is invalid, and
    /// `ApplicationError::NotFound` if no source produced a usable product.
    pub async fn aggregate(&self, filter: &ProductFilter) -> ApplicationResult<ProductAggregate> {
        self.collect(filter).await.map(|report| report.aggregate)
    }

    /// Collects products and returns them with collection diagnostics.
    ///
    /// # Errors
    ///
    /// Same as [`aggregate`](Self::aggregate).
    #[tracing::instrument(
        name = "aggregate",
        skip_all,
        fields(request_id = %Uuid::new_v4(), query = %filter.query(), sort = %filter.sort())
    )]
    pub async fn collect(&self, filter: &ProductFilter) -> ApplicationResult<AggregationReport> {
        if let Err(reason) = filter.validate() {
            tracing::debug!(%reason, "rejecting filter");
            return Err(ApplicationError::invalid_filter(filter));
        }

        let outcomes = self.collect_from_sources(filter).await;
        let sources_queried = outcomes.len();

        let mut products = Vec::new();
        let mut failures = Vec::new();
        let mut records_dropped = 0;

        for (source, outcome) in outcomes {
            match outcome {
                Ok(batch) => {
                    tracing::info!(
                        %source,
                        products = batch.products.len(),
                        dropped = batch.dropped,
                        "source answered"
                    );
                    records_dropped += batch.dropped;
                    products.extend(batch.products);
                }
                Err(error) => {
                    tracing::warn!(%source, %error, "source failed");
                    failures.push(error);
                }
            }
        }

        if products.is_empty() {
            tracing::info!(
                sources_queried,
                failed = failures.len(),
                records_dropped,
                "no product found"
            );
            return Err(ApplicationError::no_product_found(filter.query()));
        }

        let mut ordered = self.sort_policy.apply(products, filter.sort());
        if let Some(max) = self.config.max_products {
            ordered.truncate(max);
        }

        tracing::info!(
            products = ordered.len(),
            sources_queried,
            failed = failures.len(),
            records_dropped,
            policy = self.sort_policy.name(),
            "aggregation complete"
        );

        Ok(AggregationReport {
            aggregate: ProductAggregate::new(ordered),
            sources_queried,
            sources_responded: sources_queried - failures.len(),
            failures,
            records_dropped,
        })
    }

    /// Queries all sources concurrently and waits for every one of them.
    async fn collect_from_sources(
        &self,
        filter: &ProductFilter,
    ) -> Vec<(Source, SourceResult<SourceBatch>)> {
        let timeout_ms = self.config.per_source_timeout_ms;
        let per_source_timeout = Duration::from_millis(timeout_ms);

        let calls = self.registry.all().map(|adapter| {
            let source = adapter.source();
            async move {
                let outcome = match timeout(per_source_timeout, adapter.fetch_products(filter)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::timeout(source, Some(timeout_ms))),
                };
                (source, outcome)
            }
        });

        join_all(calls).await
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Returns the sort policy name.
    #[must_use]
    pub fn sort_policy_name(&self) -> &'static str {
        self.sort_policy.name()
    }
}
