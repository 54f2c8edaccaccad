//! # Application Errors
//!
//! Errors surfaced by the aggregation use case.
//!
//! Source and record failures are absorbed inside the aggregator, so only
//! two outcomes ever reach a caller:
//!
//! ```text
//! ApplicationError
//! ├── InvalidInput(String) - the filter was rejected before any source was called
//! └── NotFound(String)     - every source answered, none produced a product
//! ```
//!
//! Both render as their bare message, which is what the REST layer returns.
//!
//! # Examples
//!
//! ```
//! use product_composite::application::error::ApplicationError;
//!
//! let err = ApplicationError::no_product_found("iphone 12 000000");
//! assert_eq!(err.to_string(), "No product found for query: iphone 12 000000");
//! assert!(err.is_not_found());
//! ```

use crate::domain::entities::ProductFilter;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// The caller's input was rejected.
    #[error("{0}")]
    InvalidInput(String),

    /// Nothing matched the query.
    #[error("{0}")]
    NotFound(String),
}

impl ApplicationError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates the invalid input error for a rejected filter.
    ///
    /// The message is exactly `INVALID: ` followed by the filter rendering.
    /// The validation reason is logged by the caller, not returned.
    #[must_use]
    pub fn invalid_filter(filter: &ProductFilter) -> Self {
        Self::InvalidInput(format!("INVALID: {filter}"))
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates the not found error for a query that matched nothing.
    #[must_use]
    pub fn no_product_found(query: &str) -> Self {
        Self::NotFound(format!("No product found for query: {query}"))
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message) | Self::NotFound(message) => message,
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this is an invalid input error.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
