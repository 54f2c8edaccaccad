//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Numeric Types
//!
//! - [`Price`]: Non-negative decimal price
//! - [`DiscountRate`]: Percentage in `0..=100`
//!
//! ## Domain Enums
//!
//! - [`Source`]: Originating marketplace
//! - [`SortDirection`]: ASC or DESC
//! - [`SortKey`]: Field the result set is ordered by

pub mod discount_rate;
pub mod enums;
pub mod price;

pub use discount_rate::DiscountRate;
pub use enums::{ParseEnumError, SortDirection, SortKey, Source};
pub use price::Price;
