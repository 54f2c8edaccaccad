//! # Domain Layer
//!
//! Marketplace-independent product model.
//!
//! - [`entities`]: [`Product`](entities::Product), [`ProductAggregate`](entities::ProductAggregate)
//!   and [`ProductFilter`](entities::ProductFilter)
//! - [`value_objects`]: [`Price`](value_objects::Price),
//!   [`DiscountRate`](value_objects::DiscountRate) and the domain enums
//! - [`errors`]: invariant violations raised while building domain values

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
