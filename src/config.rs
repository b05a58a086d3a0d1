//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_URL` - Base URL of the stock/product catalog API
//!
//! ## Optional
//! - `CATALOG_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 10)
//! - `CART_STORAGE_PATH` - Path of the persistent mirror file (default: rocketshoes-cart.json)
//! - `CART_STORAGE_KEY` - Key the cart is stored under (default: @RocketShoes:cart)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default key the serialized cart is stored under in the mirror.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Path of the persistent mirror file
    pub storage_path: PathBuf,
    /// Key the serialized cart is stored under
    pub storage_key: String,
}

/// Stock/product catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (e.g., <http://localhost:3333>)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("CATALOG_API_URL")?;
        // Validate early so a malformed URL fails at startup, not on first use
        Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string()))?;

        let timeout_secs = get_env_or_default("CATALOG_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        let storage_path =
            PathBuf::from(get_env_or_default("CART_STORAGE_PATH", "rocketshoes-cart.json"));
        let storage_key = get_env_or_default("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);

        Ok(Self {
            catalog: CatalogConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            storage_path,
            storage_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_used_when_variable_is_absent() {
        assert_eq!(
            get_env_or_default("ROCKETSHOES_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn missing_required_variable_is_an_error() {
        let err = get_required_env("ROCKETSHOES_TEST_UNSET_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        assert_eq!(
            err.to_string(),
            "Missing environment variable: ROCKETSHOES_TEST_UNSET_VAR"
        );
    }
}
