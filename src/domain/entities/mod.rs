//! # Domain Entities
//!
//! - [`Product`]: normalized listing built by a source mapper
//! - [`ProductAggregate`]: the ordered result of one search
//! - [`ProductFilter`]: query and sort direction supplied by the caller

pub mod product;
pub mod product_aggregate;
pub mod product_filter;

pub use product::{Product, ProductBuilder};
pub use product_aggregate::ProductAggregate;
pub use product_filter::ProductFilter;
