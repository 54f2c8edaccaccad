//! # API Layer
//!
//! External interfaces of the service.

pub mod rest;
