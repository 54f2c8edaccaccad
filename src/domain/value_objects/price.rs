//! # Price Value Object
//!
//! Non-negative decimal price.
//!
//! # Examples
//!
//! ```
//! use product_composite::domain::value_objects::Price;
//!
//! let price = Price::new(19.99).unwrap();
//! assert!(!price.is_zero());
//! assert!(Price::new(-1.0).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative product price.
///
/// Serialized as a JSON number.
///
/// # Invariants
///
/// - Never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Creates a price from a float.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is negative or not finite.
    pub fn new(value: f64) -> DomainResult<Self> {
        let decimal = Decimal::from_f64(value)
            .ok_or(DomainError::InvalidPrice(Decimal::NEGATIVE_ONE))?;
        Self::from_decimal(decimal)
    }

    /// Creates a price from a decimal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is negative.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidPrice(value));
        }
        Ok(Self(value.normalize()))
    }

    /// Returns the inner decimal.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Returns the price as a float, for display and benchmarks.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Returns true if the price is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn accepts_zero_and_positive() {
        assert!(Price::new(0.0).unwrap().is_zero());
        assert_eq!(
            Price::from_decimal(Decimal::from_str("12.50").unwrap())
                .unwrap()
                .to_string(),
            "12.5"
        );
    }

    #[test]
    fn rejects_negative() {
        let err = Price::from_decimal(Decimal::from_str("-0.01").unwrap()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPrice(_)));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Price::new(f64::NAN).is_err());
    }

    #[test]
    fn ordering_follows_value() {
        assert!(Price::new(1.0).unwrap() < Price::new(2.0).unwrap());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_value(Price::new(99.5).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!(99.5));
    }
}
