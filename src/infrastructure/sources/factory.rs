//! # Source Factory
//!
//! Builds the source registry from configuration.

use crate::config::SourcesConfig;
use crate::infrastructure::sources::lazada::{LazadaClient, LazadaMapper};
use crate::infrastructure::sources::registry::{RegistryError, SourceRegistry};
use crate::infrastructure::sources::shopee::{ShopeeClient, ShopeeMapper};
use crate::infrastructure::sources::tiki::{TikiClient, TikiMapper};
use crate::infrastructure::sources::traits::SourceBinding;

/// Registers an HTTP adapter for every enabled source.
///
/// # Errors
///
/// Returns `RegistryError::Client` if an HTTP client cannot be built and
/// `RegistryError::NoSources` if every source is disabled.
pub fn build_registry(config: &SourcesConfig) -> Result<SourceRegistry, RegistryError> {
    let mut registry = SourceRegistry::new();

    if config.tiki.enabled {
        let client = TikiClient::new(&config.tiki.base_url, config.tiki.timeout_ms)?;
        registry.register(SourceBinding::new(client, TikiMapper))?;
    }
    if config.shopee.enabled {
        let client = ShopeeClient::new(&config.shopee.base_url, config.shopee.timeout_ms)?;
        let mapper = ShopeeMapper::new(&config.shopee.image_base_url);
        registry.register(SourceBinding::new(client, mapper))?;
    }
    if config.lazada.enabled {
        let client = LazadaClient::new(&config.lazada.base_url, config.lazada.timeout_ms)?;
        registry.register(SourceBinding::new(client, LazadaMapper))?;
    }

    registry.ensure_not_empty()?;
    tracing::info!(sources = ?registry.sources(), "source registry ready");
    Ok(registry)
}
