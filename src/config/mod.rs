// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::Result;
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Base URL of the Places web service.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

impl AppConfig {
    /// Load configuration from the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest, prefix `PLACES__`)
    /// 2. Config file (`path`, or the default location when `None`)
    /// 3. Defaults (lowest)
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("PLACES")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut app: AppConfig = config.try_deserialize()?;
        if app.places.api_key.as_deref().map_or(true, str::is_empty) {
            app.places.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }
        Ok(app)
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("places")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.places.verify_tls);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.redis.port, 6379);
        assert_eq!(config.places.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let backend: CacheBackend = serde_json::from_str("\"redis\"").unwrap();
        assert_eq!(backend, CacheBackend::Redis);
    }
}
