//! # Source Client Traits
//!
//! Port definitions for marketplace integrations.
//!
//! - [`SourceClient`]: fetches native records for a filter from one marketplace
//! - [`SourceMapper`]: converts one native record into a [`Product`]
//! - [`SourceBinding`]: pairs a client with its mapper
//! - [`SourceAdapter`]: the object-safe view of a binding the aggregator works with
//!
//! The native record type is an associated type of the client, so the
//! pairing between a client and its mapper is checked at compile time. The
//! binding erases it, letting every marketplace live in one registry.
//!
//! # Examples
//!
//! ```ignore
//! use product_composite::infrastructure::sources::{SourceBinding, SourceRegistry};
//! use product_composite::infrastructure::sources::tiki::{TikiClient, TikiMapper};
//!
//! let mut registry = SourceRegistry::new();
//! registry.register(SourceBinding::new(TikiClient::new(base_url, 3000)?, TikiMapper))?;
//! ```

use crate::domain::entities::{Product, ProductFilter};
use crate::domain::value_objects::Source;
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;

/// Client for one marketplace search API.
#[async_trait]
pub trait SourceClient: Send + Sync + fmt::Debug {
    /// Record handed to the mapper, usually one raw JSON element.
    type Record: Send + 'static;

    /// Returns the marketplace this client talks to.
    fn source(&self) -> Source;

    /// Searches the marketplace for the filter's query, in the filter's sort order.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` or `SourceError::Timeout` when the
    /// call as a whole fails.
    async fn fetch(&self, filter: &ProductFilter) -> SourceResult<Vec<Self::Record>>;
}

/// Converts one marketplace record into a [`Product`].
pub trait SourceMapper<R>: Send + Sync + fmt::Debug {
    /// Maps one record.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::MalformedRecord` if a required field is missing,
    /// wrongly typed or out of domain.
    fn map(&self, record: R) -> SourceResult<Product>;
}

/// Decodes one raw JSON record into a marketplace's native shape.
///
/// Marketplaces answer with an envelope of loosely typed records. Decoding
/// each element on its own keeps one bad record from failing the batch.
///
/// # Errors
///
/// Returns `SourceError::MalformedRecord` if the record does not fit `R`.
pub fn decode_record<R: DeserializeOwned>(
    origin: Source,
    record: serde_json::Value,
) -> SourceResult<R> {
    serde_json::from_value(record)
        .map_err(|e| SourceError::malformed(origin, format!("undecodable record: {e}")))
}

/// Products produced by one source for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBatch {
    /// Successfully mapped products.
    pub products: Vec<Product>,
    /// Number of records dropped as malformed.
    pub dropped: usize,
}

impl SourceBatch {
    /// Creates a batch with no dropped records.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            dropped: 0,
        }
    }

    /// Total records received, mapped or not.
    #[must_use]
    pub fn received(&self) -> usize {
        self.products.len() + self.dropped
    }
}

/// Object-safe source used by the registry and the aggregator.
#[async_trait]
pub trait SourceAdapter: Send + Sync + fmt::Debug {
    /// Returns the marketplace this adapter serves.
    fn source(&self) -> Source;

    /// Fetches and normalizes products for the filter.
    ///
    /// Malformed records are dropped and counted, never returned as errors.
    ///
    /// # Errors
    ///
    /// Returns a source-local error when the underlying fetch fails.
    async fn fetch_products(&self, filter: &ProductFilter) -> SourceResult<SourceBatch>;
}

/// A client paired with the mapper for its native records.
#[derive(Debug)]
pub struct SourceBinding<C, M> {
    client: C,
    mapper: M,
}

impl<C, M> SourceBinding<C, M>
where
    C: SourceClient,
    M: SourceMapper<C::Record>,
{
    /// Binds a client to its mapper.
    #[must_use]
    pub fn new(client: C, mapper: M) -> Self {
        Self { client, mapper }
    }

    /// Returns the client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the mapper paired with the client.
    #[must_use]
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    fn map_record(&self, record: C::Record) -> SourceResult<Product> {
        let product = self.mapper.map(record)?;
        let source = self.client.source();
        if product.source() != source {
            return Err(SourceError::malformed(
                source,
                format!("mapper tagged product with {}", product.source()),
            ));
        }
        Ok(product)
    }
}

#[async_trait]
impl<C, M> SourceAdapter for SourceBinding<C, M>
where
    C: SourceClient,
    M: SourceMapper<C::Record>,
{
    fn source(&self) -> Source {
        self.client.source()
    }

    async fn fetch_products(&self, filter: &ProductFilter) -> SourceResult<SourceBatch> {
        let records = self.client.fetch(filter).await?;
        let mut batch = SourceBatch {
            products: Vec::with_capacity(records.len()),
            dropped: 0,
        };

        for record in records {
            match self.map_record(record) {
                Ok(product) => batch.products.push(product),
                Err(error) => {
                    batch.dropped += 1;
                    tracing::warn!(source = %self.source(), %error, "dropping malformed record");
                }
            }
        }

        Ok(batch)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductBuilder;
    use crate::domain::value_objects::{Price, SortDirection};

    #[derive(Debug, Clone)]
    struct Row {
        id: &'static str,
        price: f64,
    }

    #[derive(Debug)]
    struct StaticClient {
        source: Source,
        rows: Vec<Row>,
    }

    #[async_trait]
    impl SourceClient for StaticClient {
        type Record = Row;

        fn source(&self) -> Source {
            self.source
        }

        async fn fetch(&self, _filter: &ProductFilter) -> SourceResult<Vec<Row>> {
            Ok(self.rows.clone())
        }
    }

    #[derive(Debug)]
    struct RowMapper {
        tag: Source,
    }

    impl SourceMapper<Row> for RowMapper {
        fn map(&self, record: Row) -> SourceResult<Product> {
            let price =
                Price::new(record.price).map_err(|e| SourceError::from_domain(self.tag, e))?;
            ProductBuilder::new(record.id, "thing", self.tag)
                .price(price)
                .build()
                .map_err(|e| SourceError::from_domain(self.tag, e))
        }
    }

    fn filter() -> ProductFilter {
        ProductFilter::new("thing", SortDirection::Asc)
    }

    #[tokio::test]
    async fn binding_maps_and_drops_malformed() {
        let binding = SourceBinding::new(
            StaticClient {
                source: Source::Tiki,
                rows: vec![
                    Row { id: "a", price: 1.0 },
                    Row { id: "b", price: -1.0 },
                    Row { id: "", price: 2.0 },
                    Row { id: "c", price: 3.0 },
                ],
            },
            RowMapper { tag: Source::Tiki },
        );

        let batch = binding.fetch_products(&filter()).await.unwrap();
        assert_eq!(batch.products.len(), 2);
        assert_eq!(batch.dropped, 2);
        assert_eq!(batch.received(), 4);
        assert_eq!(binding.source(), Source::Tiki);
    }

    #[tokio::test]
    async fn binding_drops_products_tagged_with_another_source() {
        let binding = SourceBinding::new(
            StaticClient {
                source: Source::Tiki,
                rows: vec![Row { id: "a", price: 1.0 }],
            },
            RowMapper {
                tag: Source::Lazada,
            },
        );

        let batch = binding.fetch_products(&filter()).await.unwrap();
        assert!(batch.products.is_empty());
        assert_eq!(batch.dropped, 1);
    }

    #[test]
    fn decode_record_reports_wrong_types_as_malformed() {
        #[derive(Debug, serde::Deserialize)]
        struct Native {
            id: Option<u64>,
        }

        let ok: Native = decode_record(Source::Tiki, serde_json::json!({"id": 1})).unwrap();
        assert_eq!(ok.id, Some(1));

        let err = decode_record::<Native>(Source::Tiki, serde_json::json!({"id": "oops"}))
            .unwrap_err();
        assert!(matches!(err, SourceError::MalformedRecord { origin: Source::Tiki, .. }));
        assert!(!err.is_source_local());
    }

    #[tokio::test]
    async fn binding_propagates_fetch_failure() {
        #[derive(Debug)]
        struct DownClient;

        #[async_trait]
        impl SourceClient for DownClient {
            type Record = Row;

            fn source(&self) -> Source {
                Source::Shopee
            }

            async fn fetch(&self, _filter: &ProductFilter) -> SourceResult<Vec<Row>> {
                Err(SourceError::unavailable(Source::Shopee, "down"))
            }
        }

        let binding = SourceBinding::new(
            DownClient,
            RowMapper {
                tag: Source::Shopee,
            },
        );
        let err = binding.fetch_products(&filter()).await.unwrap_err();
        assert!(err.is_source_local());
    }
}
