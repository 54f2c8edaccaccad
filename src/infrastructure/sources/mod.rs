//! # Marketplace Sources
//!
//! Integrations with the external marketplaces products are collected from.
//!
//! ## Ports
//!
//! - [`SourceClient`]: fetches native records from one marketplace
//! - [`SourceMapper`]: normalizes one native record into a `Product`
//! - [`SourceAdapter`]: object-safe client + mapper pair used by the aggregator
//!
//! ## Implementations
//!
//! - [`tiki`]: Tiki product search
//! - [`shopee`]: Shopee item search
//! - [`lazada`]: Lazada catalog search
//!
//! ## Registry
//!
//! - [`SourceRegistry`]: the active adapters, keyed by source
//! - [`build_registry`]: registers the enabled sources from configuration

pub mod error;
pub mod factory;
pub mod http_client;
pub mod lazada;
pub mod registry;
pub mod shopee;
pub mod tiki;
pub mod traits;

pub use error::{SourceError, SourceResult};
pub use factory::build_registry;
pub use http_client::HttpClient;
pub use lazada::{LazadaClient, LazadaMapper};
pub use registry::{RegistryError, SourceRegistry};
pub use shopee::{ShopeeClient, ShopeeMapper};
pub use tiki::{TikiClient, TikiMapper};
pub use traits::{SourceAdapter, SourceBatch, SourceBinding, SourceClient, SourceMapper};
