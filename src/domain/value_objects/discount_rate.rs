//! # Discount Rate Value Object
//!
//! Percentage discount between 0 and 100 inclusive.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discount percentage in `0..=100`.
///
/// # Examples
///
/// ```
/// use product_composite::domain::value_objects::DiscountRate;
///
/// let rate = DiscountRate::new(25.0).unwrap();
/// assert!(rate.is_discounted());
/// assert!(DiscountRate::new(120.0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DiscountRate(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl DiscountRate {
    /// No discount.
    pub const NONE: DiscountRate = DiscountRate(Decimal::ZERO);

    const MAX: Decimal = Decimal::ONE_HUNDRED;

    /// Creates a discount rate from a float percentage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDiscountRate` if the value is outside
    /// `0..=100` or not finite.
    pub fn new(percent: f64) -> DomainResult<Self> {
        let decimal = Decimal::from_f64(percent)
            .ok_or(DomainError::InvalidDiscountRate(Decimal::NEGATIVE_ONE))?;
        Self::from_decimal(decimal)
    }

    /// Creates a discount rate from a decimal percentage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDiscountRate` if the value is outside `0..=100`.
    pub fn from_decimal(percent: Decimal) -> DomainResult<Self> {
        if percent < Decimal::ZERO || percent > Self::MAX {
            return Err(DomainError::InvalidDiscountRate(percent));
        }
        Ok(Self(percent.normalize()))
    }

    /// Returns the percentage as a decimal.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Returns the percentage as a float.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Returns true if any discount applies.
    #[inline]
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        !self.0.is_zero()
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
