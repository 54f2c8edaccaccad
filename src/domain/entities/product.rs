//! # Product Entity
//!
//! Normalized product listing.
//!
//! Every marketplace returns its own record shape; source mappers translate
//! each record into a [`Product`] through [`ProductBuilder`], which enforces
//! the invariants below.
//!
//! # Examples
//!
//! ```
//! use product_composite::domain::entities::product::ProductBuilder;
//! use product_composite::domain::value_objects::{Price, Source};
//!
//! let product = ProductBuilder::new("SKU-1", "iPhone 12", Source::Tiki)
//!     .price(Price::new(15_990_000.0).unwrap())
//!     .brand("Apple")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(product.code(), "SKU-1");
//! assert_eq!(product.source(), Source::Tiki);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{DiscountRate, Price, Source};
use serde::Serialize;
use std::fmt;

/// A product listing normalized across marketplaces.
///
/// # Invariants
///
/// - `code` and `name` are non-blank
/// - `price` is non-negative
/// - `discount_rate` is within `0..=100`
///
/// Serialized with camelCase keys (`discountRate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Source-assigned identifier.
    code: String,
    /// Display name.
    name: String,
    /// Free-form description.
    description: String,
    /// Current selling price.
    price: Price,
    /// Brand name, empty if unknown.
    brand: String,
    /// Category name, empty if unknown.
    category: String,
    /// Promotion or voucher code.
    promotion: Option<String>,
    /// Image URI.
    image: String,
    /// Discount percentage.
    discount_rate: DiscountRate,
    /// Marketplace the listing came from.
    source: Source,
}

impl Product {
    /// Returns the source-assigned code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the product name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the brand.
    #[inline]
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Returns the category.
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the promotion code, if any.
    #[inline]
    #[must_use]
    pub fn promotion(&self) -> Option<&str> {
        self.promotion.as_deref()
    }

    /// Returns the image URI.
    #[inline]
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the discount rate.
    #[inline]
    #[must_use]
    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }

    /// Returns the originating marketplace.
    #[inline]
    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product({}:{} '{}' @ {})",
            self.source, self.code, self.name, self.price
        )
    }
}

/// Builder for [`Product`].
///
/// Optional fields default to empty strings, no promotion and no discount.
#[derive(Debug, Clone)]
#[must_use]
pub struct ProductBuilder {
    code: String,
    name: String,
    source: Source,
    description: String,
    price: Price,
    brand: String,
    category: String,
    promotion: Option<String>,
    image: String,
    discount_rate: DiscountRate,
}

impl ProductBuilder {
    /// Starts a product with its identifying fields.
    pub fn new(code: impl Into<String>, name: impl Into<String>, source: Source) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            source,
            description: String::new(),
            price: Price::ZERO,
            brand: String::new(),
            category: String::new(),
            promotion: None,
            image: String::new(),
            discount_rate: DiscountRate::NONE,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the price.
    pub fn price(mut self, price: Price) -> Self {
        self.price = price;
        self
    }

    /// Sets the brand.
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Sets the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the promotion code. Blank codes are treated as no promotion.
    pub fn promotion(mut self, promotion: Option<String>) -> Self {
        self.promotion = promotion.filter(|p| !p.trim().is_empty());
        self
    }

    /// Sets the image URI.
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the discount rate.
    pub fn discount_rate(mut self, discount_rate: DiscountRate) -> Self {
        self.discount_rate = discount_rate;
        self
    }

    /// Builds the product.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if `code` or `name` is blank.
    pub fn build(self) -> DomainResult<Product> {
        if self.code.trim().is_empty() {
            return Err(DomainError::MissingField("code"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }

        Ok(Product {
            code: self.code,
            name: self.name,
            description: self.description,
            price: self.price,
            brand: self.brand,
            category: self.category,
            promotion: self.promotion,
            image: self.image,
            discount_rate: self.discount_rate,
            source: self.source,
        })
    }
}
