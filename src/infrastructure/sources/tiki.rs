//! # Tiki Source
//!
//! Client and mapper for the Tiki product search API.
//!
//! `GET {base}/api/v2/products?q=<query>&sort=price,asc` answers
//! `{"data": [TikiProduct, ...]}` with decimal prices and percentage
//! discounts already in `0..=100`.

use crate::domain::entities::{Product, ProductBuilder, ProductFilter};
use crate::domain::value_objects::{DiscountRate, Price, SortDirection, Source};
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::{SourceClient, SourceMapper, decode_record};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

const SEARCH_PATH: &str = "/api/v2/products";

/// Native Tiki product record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TikiProduct {
    /// Numeric product id.
    pub id: Option<u64>,
    /// Seller SKU, preferred over `id` as the product code.
    pub sku: Option<String>,
    /// Product name.
    pub name: Option<String>,
    /// Short description.
    pub short_description: Option<String>,
    /// Selling price.
    pub price: Option<Decimal>,
    /// Brand name.
    pub brand_name: Option<String>,
    /// Primary category.
    pub categories: Option<TikiCategory>,
    /// Coupon code advertised on the listing.
    pub promotion_code: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail_url: Option<String>,
    /// Discount percentage.
    pub discount_rate: Option<Decimal>,
}

/// Tiki category reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TikiCategory {
    /// Category id.
    pub id: Option<u64>,
    /// Category name.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TikiSearchResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// HTTP client for Tiki.
#[derive(Debug, Clone)]
pub struct TikiClient {
    http: HttpClient,
    base_url: String,
}

impl TikiClient {
    /// Creates a client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> SourceResult<Self> {
        Ok(Self {
            http: HttpClient::new(Source::Tiki, timeout_ms)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn sort_param(sort: SortDirection) -> &'static str {
        match sort {
            SortDirection::Asc => "price,asc",
            SortDirection::Desc => "price,desc",
        }
    }
}

#[async_trait]
impl SourceClient for TikiClient {
    type Record = Value;

    fn source(&self) -> Source {
        Source::Tiki
    }

    async fn fetch(&self, filter: &ProductFilter) -> SourceResult<Vec<Value>> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let params = [
            ("q", filter.trimmed_query()),
            ("sort", Self::sort_param(filter.sort())),
        ];
        let response: TikiSearchResponse = self.http.get_with_params(&url, &params).await?;
        Ok(response.data.unwrap_or_default())
    }
}

/// Maps raw Tiki records through [`TikiProduct`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TikiMapper;

impl SourceMapper<Value> for TikiMapper {
    fn map(&self, record: Value) -> SourceResult<Product> {
        self.normalize(decode_record(Source::Tiki, record)?)
    }
}

impl TikiMapper {
    /// Normalizes a decoded record.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::MalformedRecord` if the record has no usable
    /// code, name or price.
    pub fn normalize(&self, record: TikiProduct) -> SourceResult<Product> {
        let malformed = |e| SourceError::from_domain(Source::Tiki, e);

        let code = record
            .sku
            .filter(|sku| !sku.trim().is_empty())
            .or_else(|| record.id.map(|id| id.to_string()))
            .ok_or_else(|| SourceError::malformed(Source::Tiki, "record has neither sku nor id"))?;
        let price = record
            .price
            .ok_or_else(|| SourceError::malformed(Source::Tiki, "missing price"))
            .and_then(|p| Price::from_decimal(p).map_err(malformed))?;
        let discount_rate = match record.discount_rate {
            Some(rate) => DiscountRate::from_decimal(rate).map_err(malformed)?,
            None => DiscountRate::NONE,
        };
        let category = record
            .categories
            .and_then(|c| c.name)
            .unwrap_or_default();

        ProductBuilder::new(code, record.name.unwrap_or_default(), Source::Tiki)
            .description(record.short_description.unwrap_or_default())
            .price(price)
            .brand(record.brand_name.unwrap_or_default())
            .category(category)
            .promotion(record.promotion_code)
            .image(record.thumbnail_url.unwrap_or_default())
            .discount_rate(discount_rate)
            .build()
            .map_err(malformed)
    }
}
