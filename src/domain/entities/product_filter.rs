//! # Product Filter
//!
//! The caller's search request: a free-text query and a sort direction.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::SortDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Search filter applied across all sources.
///
/// Identity is structural: two filters with the same query and sort are
/// equal and hash alike.
///
/// # Examples
///
/// ```
/// use product_composite::domain::entities::ProductFilter;
/// use product_composite::domain::value_objects::SortDirection;
///
/// let filter = ProductFilter::new("iphone", SortDirection::Asc);
/// assert!(filter.validate().is_ok());
/// assert_eq!(filter.to_string(), "ProductFilter(query=\"iphone\", sort=ASC)");
///
/// assert!(ProductFilter::new("   ", SortDirection::Asc).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductFilter {
    query: String,
    #[serde(default)]
    sort: SortDirection,
}

impl ProductFilter {
    /// Longest accepted query, in characters.
    pub const MAX_QUERY_LEN: usize = 256;

    /// Creates a filter. Call [`validate`](Self::validate) before use.
    #[must_use]
    pub fn new(query: impl Into<String>, sort: SortDirection) -> Self {
        Self {
            query: query.into(),
            sort,
        }
    }

    /// Returns the raw query.
    #[inline]
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the query with surrounding whitespace removed.
    #[inline]
    #[must_use]
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    /// Returns the sort direction.
    #[inline]
    #[must_use]
    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    /// Checks that the query can be sent to the sources.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuery` if the query is blank, longer than
    /// [`MAX_QUERY_LEN`](Self::MAX_QUERY_LEN) characters, or contains
    /// control characters.
    pub fn validate(&self) -> DomainResult<()> {
        let query = self.trimmed_query();
        if query.is_empty() {
            return Err(DomainError::InvalidQuery("query must not be empty".into()));
        }
        if query.chars().count() > Self::MAX_QUERY_LEN {
            return Err(DomainError::InvalidQuery(format!(
                "query exceeds {} characters",
                Self::MAX_QUERY_LEN
            )));
        }
        if query.chars().any(char::is_control) {
            return Err(DomainError::InvalidQuery(
                "query contains control characters".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ProductFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductFilter(query={:?}, sort={})", self.query, self.sort)
    }
}
