//! # Application Layer
//!
//! Use cases built on the domain model and the source adapters.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
