//! # Infrastructure Layer
//!
//! Adapters to the outside world.
//!
//! - [`sources`]: marketplace clients, mappers and the source registry

pub mod sources;
