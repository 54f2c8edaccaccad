//! # Sort Policy
//!
//! Strategies for ordering the aggregated product set.
//!
//! This module provides the [`SortPolicy`] trait and [`FieldSortPolicy`],
//! which orders by a configurable [`SortKey`]. Products that compare equal
//! on the key are ordered by source and then by code, both ascending, so the
//! output never depends on the order in which sources answered.

use crate::domain::entities::Product;
use crate::domain::value_objects::{SortDirection, SortKey};
use std::cmp::Ordering;
use std::fmt;

/// Trait for sort policies.
pub trait SortPolicy: Send + Sync + fmt::Debug {
    /// Orders the products in the given direction.
    ///
    /// Must be total and deterministic: the same input multiset always
    /// yields the same sequence.
    fn apply(&self, products: Vec<Product>, direction: SortDirection) -> Vec<Product>;

    /// Returns the name of this policy.
    fn name(&self) -> &'static str;
}

/// Orders products by one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSortPolicy {
    key: SortKey,
}

impl FieldSortPolicy {
    /// Creates a policy ordering by `key`.
    #[must_use]
    pub fn new(key: SortKey) -> Self {
        Self { key }
    }

    /// Returns the sort key.
    #[must_use]
    pub fn key(&self) -> SortKey {
        self.key
    }

    fn compare_key(&self, a: &Product, b: &Product) -> Ordering {
        match self.key {
            SortKey::Price => a.price().cmp(&b.price()),
            SortKey::DiscountRate => a.discount_rate().cmp(&b.discount_rate()),
            SortKey::Name => a
                .name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.name().cmp(b.name())),
        }
    }

    fn tie_break(a: &Product, b: &Product) -> Ordering {
        a.source()
            .cmp(&b.source())
            .then_with(|| a.code().cmp(b.code()))
    }
}

impl SortPolicy for FieldSortPolicy {
    fn apply(&self, mut products: Vec<Product>, direction: SortDirection) -> Vec<Product> {
        products.sort_by(|a, b| {
            let by_key = match direction {
                SortDirection::Asc => self.compare_key(a, b),
                SortDirection::Desc => self.compare_key(b, a),
            };
            by_key.then_with(|| Self::tie_break(a, b))
        });
        products
    }

    fn name(&self) -> &'static str {
        match self.key {
            SortKey::Price => "ByPrice",
            SortKey::Name => "ByName",
            SortKey::DiscountRate => "ByDiscountRate",
        }
    }
}
