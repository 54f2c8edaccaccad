//! # Configuration
//!
//! Layered service configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. the file named by `PRODUCT_COMPOSITE_CONFIG` (optional)
//! 4. environment variables such as `PRODUCT_COMPOSITE__SERVER__PORT=9090`
//!
//! A `.env` file in the working directory is loaded before the environment
//! is read.
//!
//! # Examples
//!
//! ```
//! use product_composite::config::AppConfig;
//!
//! let config = AppConfig::from_toml(r#"
//!     [auth]
//!     jwt_secret = "local-secret"
//!
//!     [sources.lazada]
//!     enabled = false
//! "#).unwrap();
//!
//! assert_eq!(config.server.port, 8080);
//! assert_eq!(config.sources.enabled().len(), 2);
//! ```

use crate::application::services::AggregationConfig;
use crate::domain::value_objects::{SortKey, Source};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable naming an extra configuration file.
pub const CONFIG_PATH_ENV: &str = "PRODUCT_COMPOSITE_CONFIG";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PRODUCT_COMPOSITE";

const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The configuration was read but is not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Bearer-token settings.
    pub auth: AuthConfig,
    /// Aggregation engine settings.
    pub aggregation: AggregationSettings,
    /// Marketplace source settings.
    pub sources: SourcesConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads the configuration from every layer and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source cannot be read and
    /// `ConfigError::Invalid` if the result fails [`validate`](Self::validate).
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            builder = builder.add_source(File::with_name(&path).required(true));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_settings(settings)
    }

    /// Parses and validates a TOML document layered over the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can run a server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the JWT secret is empty, a timeout
    /// is zero, or no source is enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.jwt_secret must be set".into()));
        }
        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "server.request_timeout_ms must be positive".into(),
            ));
        }
        if self.aggregation.per_source_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "aggregation.per_source_timeout_ms must be positive".into(),
            ));
        }
        for (source, timeout_ms) in self.sources.timeouts() {
            if timeout_ms == 0 {
                return Err(ConfigError::Invalid(format!(
                    "sources.{}.timeout_ms must be positive",
                    source.key()
                )));
            }
        }
        if self.sources.enabled().is_empty() {
            return Err(ConfigError::Invalid("at least one source must be enabled".into()));
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Upper bound on one product request, in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_ms: 10_000,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if host and port do not form an address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server address: {e}")))
    }
}

/// Bearer-token settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret.
    pub jwt_secret: String,
    /// Scope a token must carry to search products.
    pub required_scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            required_scope: "product:read".to_string(),
        }
    }
}

/// Aggregation engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Per-source timeout in milliseconds.
    pub per_source_timeout_ms: u64,
    /// Field the result set is ordered by.
    pub sort_key: SortKey,
    /// Maximum number of products returned.
    pub max_products: Option<usize>,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            per_source_timeout_ms: 5000,
            sort_key: SortKey::Price,
            max_products: None,
        }
    }
}

impl AggregationSettings {
    /// Returns the engine configuration.
    #[must_use]
    pub fn engine_config(&self) -> AggregationConfig {
        let config = AggregationConfig::with_per_source_timeout(self.per_source_timeout_ms);
        match self.max_products {
            Some(max) => config.with_max_products(max),
            None => config,
        }
    }
}

/// Settings shared by every HTTP source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceSettings {
    /// Whether the source is registered.
    pub enabled: bool,
    /// Base URL of the marketplace API.
    pub base_url: String,
    /// HTTP request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl SourceSettings {
    fn with_base_url(base_url: &str) -> Self {
        Self {
            enabled: true,
            base_url: base_url.to_string(),
            timeout_ms: 3000,
        }
    }
}

/// Shopee settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShopeeSettings {
    /// Whether the source is registered.
    pub enabled: bool,
    /// Base URL of the search API.
    pub base_url: String,
    /// HTTP request timeout in milliseconds.
    pub timeout_ms: u64,
    /// CDN base that image hashes are resolved against.
    pub image_base_url: String,
}

impl Default for ShopeeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://shopee.vn".to_string(),
            timeout_ms: 3000,
            image_base_url: "https://cf.shopee.vn/file".to_string(),
        }
    }
}

/// Per-marketplace settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Tiki.
    pub tiki: SourceSettings,
    /// Shopee.
    pub shopee: ShopeeSettings,
    /// Lazada.
    pub lazada: SourceSettings,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tiki: SourceSettings::with_base_url("https://tiki.vn"),
            shopee: ShopeeSettings::default(),
            lazada: SourceSettings::with_base_url("https://www.lazada.vn"),
        }
    }
}

impl SourcesConfig {
    /// Returns the enabled sources in canonical order.
    #[must_use]
    pub fn enabled(&self) -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|source| match source {
                Source::Tiki => self.tiki.enabled,
                Source::Shopee => self.shopee.enabled,
                Source::Lazada => self.lazada.enabled,
            })
            .collect()
    }

    fn timeouts(&self) -> [(Source, u64); 3] {
        [
            (Source::Tiki, self.tiki.timeout_ms),
            (Source::Shopee, self.shopee.timeout_ms),
            (Source::Lazada, self.lazada.timeout_ms),
        ]
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
