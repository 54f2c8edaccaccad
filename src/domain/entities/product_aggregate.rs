//! # Product Aggregate
//!
//! The unified result of one search across all sources.

use crate::domain::entities::product::Product;
use crate::domain::value_objects::Source;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered products collected for one request.
///
/// Built once by the aggregator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAggregate {
    products: Vec<Product>,
}

impl ProductAggregate {
    /// Wraps an already ordered product sequence.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Returns the products in result order.
    #[inline]
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the number of products.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if there are no products.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Counts products per source.
    #[must_use]
    pub fn count_by_source(&self) -> BTreeMap<Source, usize> {
        let mut counts = BTreeMap::new();
        for product in &self.products {
            *counts.entry(product.source()).or_insert(0) += 1;
        }
        counts
    }

    /// Consumes the aggregate, returning the products.
    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::product::ProductBuilder;

    fn product(code: &str, source: Source) -> Product {
        ProductBuilder::new(code, "name", source).build().unwrap()
    }

    #[test]
    fn counts_by_source() {
        let aggregate = ProductAggregate::new(vec![
            product("1", Source::Tiki),
            product("2", Source::Lazada),
            product("3", Source::Tiki),
        ]);
        let counts = aggregate.count_by_source();
        assert_eq!(counts.get(&Source::Tiki), Some(&2));
        assert_eq!(counts.get(&Source::Lazada), Some(&1));
        assert_eq!(counts.get(&Source::Shopee), None);
    }

    #[test]
    fn serializes_products_key() {
        let aggregate = ProductAggregate::new(vec![product("1", Source::Tiki)]);
        let json = serde_json::to_value(&aggregate).unwrap();
        assert_eq!(json["products"].as_array().unwrap().len(), 1);
    }
}
