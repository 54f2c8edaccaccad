//! # Source Errors
//!
//! Error types for marketplace source operations.
//!
//! Every variant carries the [`Source`] it originated from so failures can be
//! attributed in logs. All of them are absorbed by the aggregator; none is
//! ever shown to the caller.
//!
//! # Examples
//!
//! ```
//! use product_composite::domain::value_objects::Source;
//! use product_composite::infrastructure::sources::error::SourceError;
//!
//! let error = SourceError::timeout(Source::Tiki, Some(3000));
//! assert!(error.is_source_local());
//!
//! let error = SourceError::malformed(Source::Lazada, "missing price");
//! assert!(!error.is_source_local());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::Source;
use thiserror::Error;

/// Error type for source client and mapper operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source could not be reached or answered with an error.
    #[error("source unavailable: {origin} - {message}")]
    Unavailable {
        /// Source that failed.
        origin: Source,
        /// Error message.
        message: String,
    },

    /// The source did not answer in time.
    #[error("source timeout: {origin}{}", elapsed_suffix(.timeout_ms))]
    Timeout {
        /// Source that timed out.
        origin: Source,
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// A single native record could not be normalized.
    #[error("malformed record from {origin}: {message}")]
    MalformedRecord {
        /// Source that produced the record.
        origin: Source,
        /// Why the record was rejected.
        message: String,
    },

    /// The client could not be constructed.
    #[error("source configuration error: {origin} - {message}")]
    Configuration {
        /// Source being configured.
        origin: Source,
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(origin: Source, message: impl Into<String>) -> Self {
        Self::Unavailable {
            origin,
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(origin: Source, timeout_ms: Option<u64>) -> Self {
        Self::Timeout { origin, timeout_ms }
    }

    /// Creates a malformed record error.
    #[must_use]
    pub fn malformed(origin: Source, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            origin,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(origin: Source, message: impl Into<String>) -> Self {
        Self::Configuration {
            origin,
            message: message.into(),
        }
    }

    /// Wraps a domain invariant violation raised while mapping a record.
    #[must_use]
    pub fn from_domain(origin: Source, error: DomainError) -> Self {
        Self::malformed(origin, error.to_string())
    }

    /// Returns the source this error is attributed to.
    #[must_use]
    pub fn origin(&self) -> Source {
        match self {
            Self::Unavailable { origin, .. }
            | Self::Timeout { origin, .. }
            | Self::MalformedRecord { origin, .. }
            | Self::Configuration { origin, .. } => *origin,
        }
    }

    /// Returns true if the whole source call failed (as opposed to one record).
    #[must_use]
    pub fn is_source_local(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }

    /// Returns true if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

fn elapsed_suffix(timeout_ms: &Option<u64>) -> String {
    timeout_ms
        .map(|ms| format!(" after {ms}ms"))
        .unwrap_or_default()
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;
