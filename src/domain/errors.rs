//! # Domain Errors
//!
//! Errors raised when a domain value would violate one of its invariants.

use rust_decimal::Decimal;
use thiserror::Error;

/// Invariant violation in a domain value or entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The search query is empty or malformed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A price was negative.
    #[error("invalid price: {0} (must be non-negative)")]
    InvalidPrice(Decimal),

    /// A discount rate fell outside 0..=100.
    #[error("invalid discount rate: {0} (must be between 0 and 100)")]
    InvalidDiscountRate(Decimal),

    /// A required field was absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
