//! # Shopee Source
//!
//! Client and mapper for the Shopee search API.
//!
//! `GET {base}/api/v4/search/search_items?keyword=<query>&by=price&order=asc`
//! answers `{"items": [{"item_basic": ShopeeItem}, ...]}`. Prices are
//! integers scaled by 100 000 and images are bare hashes served from a CDN.

use crate::domain::entities::{Product, ProductBuilder, ProductFilter};
use crate::domain::value_objects::{DiscountRate, Price, SortDirection, Source};
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::{SourceClient, SourceMapper, decode_record};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

const SEARCH_PATH: &str = "/api/v4/search/search_items";

/// Decimal places of Shopee's scaled integer prices.
const PRICE_SCALE: u32 = 5;

/// Native Shopee item record (`item_basic`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShopeeItem {
    /// Item id, unique within a shop.
    pub itemid: Option<u64>,
    /// Shop id.
    pub shopid: Option<u64>,
    /// Item name.
    pub name: Option<String>,
    /// Item description.
    pub description: Option<String>,
    /// Price scaled by 100 000.
    pub price: Option<i64>,
    /// Brand name.
    pub brand: Option<String>,
    /// Category name.
    pub category_name: Option<String>,
    /// Voucher attached to the listing.
    pub voucher_info: Option<ShopeeVoucher>,
    /// Image hash.
    pub image: Option<String>,
    /// Discount percentage.
    pub raw_discount: Option<u32>,
}

/// Voucher attached to a Shopee listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShopeeVoucher {
    /// Voucher code.
    pub voucher_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShopeeSearchResponse {
    items: Option<Vec<Value>>,
}

/// HTTP client for Shopee.
#[derive(Debug, Clone)]
pub struct ShopeeClient {
    http: HttpClient,
    base_url: String,
}

impl ShopeeClient {
    /// Creates a client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> SourceResult<Self> {
        Ok(Self {
            http: HttpClient::new(Source::Shopee, timeout_ms)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn order_param(sort: SortDirection) -> &'static str {
        match sort {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[async_trait]
impl SourceClient for ShopeeClient {
    type Record = Value;

    fn source(&self) -> Source {
        Source::Shopee
    }

    async fn fetch(&self, filter: &ProductFilter) -> SourceResult<Vec<Value>> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let params = [
            ("keyword", filter.trimmed_query()),
            ("by", "price"),
            ("order", Self::order_param(filter.sort())),
        ];
        let response: ShopeeSearchResponse = self.http.get_with_params(&url, &params).await?;
        Ok(response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|mut item| item.get_mut("item_basic").map(Value::take).unwrap_or(Value::Null))
            .collect())
    }
}

/// Maps [`ShopeeItem`] records.
///
/// Image hashes are resolved against `image_base_url`.
#[derive(Debug, Clone)]
pub struct ShopeeMapper {
    image_base_url: String,
}

impl ShopeeMapper {
    /// Creates a mapper resolving images against the given CDN base.
    #[must_use]
    pub fn new(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn image_url(&self, image: Option<String>) -> String {
        match image {
            Some(hash) if hash.starts_with("http://") || hash.starts_with("https://") => hash,
            Some(hash) if !hash.is_empty() => format!("{}/{}", self.image_base_url, hash),
            _ => String::new(),
        }
    }
}

impl SourceMapper<Value> for ShopeeMapper {
    fn map(&self, record: Value) -> SourceResult<Product> {
        self.normalize(decode_record(Source::Shopee, record)?)
    }
}

impl ShopeeMapper {
    /// Normalizes a decoded `item_basic`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::MalformedRecord` if the item has no id or
    /// price, or its price or discount is out of range.
    pub fn normalize(&self, record: ShopeeItem) -> SourceResult<Product> {
        let malformed = |e| SourceError::from_domain(Source::Shopee, e);

        let itemid = record
            .itemid
            .ok_or_else(|| SourceError::malformed(Source::Shopee, "missing itemid"))?;
        let code = match record.shopid {
            Some(shopid) => format!("{shopid}.{itemid}"),
            None => itemid.to_string(),
        };
        let scaled = record
            .price
            .ok_or_else(|| SourceError::malformed(Source::Shopee, "missing price"))?;
        let price = Price::from_decimal(Decimal::new(scaled, PRICE_SCALE)).map_err(malformed)?;
        let discount_rate = match record.raw_discount {
            Some(rate) => DiscountRate::from_decimal(Decimal::from(rate)).map_err(malformed)?,
            None => DiscountRate::NONE,
        };
        let promotion = record.voucher_info.and_then(|v| v.voucher_code);
        let image = self.image_url(record.image);

        ProductBuilder::new(code, record.name.unwrap_or_default(), Source::Shopee)
            .description(record.description.unwrap_or_default())
            .price(price)
            .brand(record.brand.unwrap_or_default())
            .category(record.category_name.unwrap_or_default())
            .promotion(promotion)
            .image(image)
            .discount_rate(discount_rate)
            .build()
            .map_err(malformed)
    }
}
