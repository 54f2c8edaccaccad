//! # Lazada Source
//!
//! Client and mapper for the Lazada catalog API.
//!
//! `GET {base}/catalog/?q=<query>&ajax=true&sort=priceasc` answers
//! `{"mods": {"listItems": [LazadaItem, ...]}}`. Prices arrive as decimal
//! strings and discounts as labels such as `"-20%"`.

use crate::domain::entities::{Product, ProductBuilder, ProductFilter};
use crate::domain::value_objects::{DiscountRate, Price, SortDirection, Source};
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::{SourceClient, SourceMapper, decode_record};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

const CATALOG_PATH: &str = "/catalog/";

/// Native Lazada list item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LazadaItem {
    /// Item id.
    pub item_id: Option<String>,
    /// Item name.
    pub name: Option<String>,
    /// Description bullet points.
    pub description: Option<Vec<String>>,
    /// Price as a decimal string.
    pub price: Option<String>,
    /// Brand name.
    pub brand_name: Option<String>,
    /// Category name.
    pub category_name: Option<String>,
    /// Promotion id.
    pub promotion_id: Option<String>,
    /// Image URL.
    pub image: Option<String>,
    /// Discount label, e.g. `"-20%"`.
    pub discount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LazadaMods {
    list_items: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct LazadaCatalogResponse {
    mods: Option<LazadaMods>,
}

/// HTTP client for Lazada.
#[derive(Debug, Clone)]
pub struct LazadaClient {
    http: HttpClient,
    base_url: String,
}

impl LazadaClient {
    /// Creates a client for the given site base URL.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> SourceResult<Self> {
        Ok(Self {
            http: HttpClient::new(Source::Lazada, timeout_ms)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn sort_param(sort: SortDirection) -> &'static str {
        match sort {
            SortDirection::Asc => "priceasc",
            SortDirection::Desc => "pricedesc",
        }
    }
}

#[async_trait]
impl SourceClient for LazadaClient {
    type Record = Value;

    fn source(&self) -> Source {
        Source::Lazada
    }

    async fn fetch(&self, filter: &ProductFilter) -> SourceResult<Vec<Value>> {
        let url = format!("{}{}", self.base_url, CATALOG_PATH);
        let params = [
            ("q", filter.trimmed_query()),
            ("ajax", "true"),
            ("sort", Self::sort_param(filter.sort())),
        ];
        let response: LazadaCatalogResponse = self.http.get_with_params(&url, &params).await?;
        Ok(response
            .mods
            .and_then(|mods| mods.list_items)
            .unwrap_or_default())
    }
}

/// Maps [`LazadaItem`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazadaMapper;

impl LazadaMapper {
    /// Parses a discount label like `"-20%"` into a percentage.
    fn parse_discount(label: &str) -> Option<Decimal> {
        let digits = label.trim().trim_start_matches('-').trim_end_matches('%').trim();
        if digits.is_empty() {
            return Some(Decimal::ZERO);
        }
        Decimal::from_str(digits).ok()
    }
}

impl SourceMapper<Value> for LazadaMapper {
    fn map(&self, record: Value) -> SourceResult<Product> {
        self.normalize(decode_record(Source::Lazada, record)?)
    }
}

impl LazadaMapper {
    /// Normalizes a decoded list item.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::MalformedRecord` if the item has no id, its
    /// price or discount label cannot be parsed, or either is out of range.
    pub fn normalize(&self, record: LazadaItem) -> SourceResult<Product> {
        let malformed = |e| SourceError::from_domain(Source::Lazada, e);

        let code = record
            .item_id
            .ok_or_else(|| SourceError::malformed(Source::Lazada, "missing itemId"))?;
        let raw_price = record
            .price
            .ok_or_else(|| SourceError::malformed(Source::Lazada, "missing price"))?;
        let price = Decimal::from_str(raw_price.trim())
            .map_err(|_| SourceError::malformed(Source::Lazada, format!("unparseable price '{raw_price}'")))
            .and_then(|p| Price::from_decimal(p).map_err(malformed))?;
        let discount_rate = match record.discount.as_deref() {
            Some(label) => {
                let percent = Self::parse_discount(label).ok_or_else(|| {
                    SourceError::malformed(Source::Lazada, format!("unparseable discount '{label}'"))
                })?;
                DiscountRate::from_decimal(percent).map_err(malformed)?
            }
            None => DiscountRate::NONE,
        };
        let description = record.description.unwrap_or_default().join("\n");

        ProductBuilder::new(code, record.name.unwrap_or_default(), Source::Lazada)
            .description(description)
            .price(price)
            .brand(record.brand_name.unwrap_or_default())
            .category(record.category_name.unwrap_or_default())
            .promotion(record.promotion_id)
            .image(record.image.unwrap_or_default())
            .discount_rate(discount_rate)
            .build()
            .map_err(malformed)
    }
}
