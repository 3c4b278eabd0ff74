//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_DATA_DIR` - Directory for saved cart, session and accounts
//!   (default: `.wood-whimsy`)
//! - `STOREFRONT_CATALOG_PATH` - JSON catalog file (default: built-in catalog)
//! - `STOREFRONT_AUTH_LATENCY_MS` - Simulated identity round trip (default: 0)
//! - `STOREFRONT_RELATED_LIMIT` - Related products shown per product (default: 4)
//! - `STOREFRONT_PRICE_CEILING` - Upper bound of the default price filter
//!   (default: 1500)
//! - `STOREFRONT_CACHE_CAPACITY` - Cached filter results (default: 256)
//! - `STOREFRONT_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::services::filter::{DEFAULT_PRICE_CEILING, FilterConfig, PriceRange};

const DEFAULT_DATA_DIR: &str = ".wood-whimsy";
const DEFAULT_RELATED_LIMIT: usize = 4;
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Root directory of the file-backed store
    pub data_dir: PathBuf,
    /// JSON catalog file, `None` for the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Delay awaited before each login and signup
    pub auth_latency: Duration,
    /// Maximum related products per product
    pub related_limit: usize,
    /// Upper bound of the default price range
    pub price_ceiling: Decimal,
    /// Maximum number of cached filter results
    pub cache_capacity: u64,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            auth_latency: Duration::ZERO,
            related_limit: DEFAULT_RELATED_LIMIT,
            price_ceiling: DEFAULT_PRICE_CEILING,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            log_format: LogFormat::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let price_ceiling: Decimal =
            env.parse_or("STOREFRONT_PRICE_CEILING", DEFAULT_PRICE_CEILING)?;
        if price_ceiling < Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_PRICE_CEILING".to_string(),
                "must not be negative".to_string(),
            ));
        }

        Ok(Self {
            data_dir: env
                .optional("STOREFRONT_DATA_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            catalog_path: env.optional("STOREFRONT_CATALOG_PATH").map(PathBuf::from),
            auth_latency: Duration::from_millis(env.parse_or("STOREFRONT_AUTH_LATENCY_MS", 0)?),
            related_limit: env.parse_or("STOREFRONT_RELATED_LIMIT", DEFAULT_RELATED_LIMIT)?,
            price_ceiling,
            cache_capacity: env.parse_or("STOREFRONT_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?,
            log_format: env.parse_or("STOREFRONT_LOG_FORMAT", LogFormat::default())?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Filter with no category, the full default price range and no sort.
    #[must_use]
    pub fn default_filter(&self) -> FilterConfig {
        FilterConfig::new().price_range(PriceRange::up_to(self.price_ceiling))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'f>(&'f dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
