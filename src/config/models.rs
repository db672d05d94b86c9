//! Configuration data structures for the places client.
//!
//! This module defines the schema for the application settings: the upstream
//! Places API connection, the response cache backend and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Upstream Places API settings.
    #[serde(default)]
    pub places: PlacesConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the upstream Places API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// API key sent with every request.
    /// Falls back to the `GOOGLE_PLACES_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whether TLS certificates are verified.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub verify_tls: bool,

    /// Base URL every endpoint path is joined onto.
    /// Default: `https://maps.googleapis.com/maps/api/place/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Which cache backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process LRU map.
    #[default]
    Memory,
    /// Remote Redis server.
    Redis,
}

/// Settings for the response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether responses are cached.
    /// Default: `false`
    #[serde(default)]
    pub enabled: bool,

    /// Backend used when caching is enabled.
    /// Default: `memory`
    #[serde(default)]
    pub backend: CacheBackend,

    /// Entry lifetime in seconds, `0` disables expiry.
    /// Default: `3600`
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Capacity of the in-memory backend.
    /// Default: `1000`
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Only store a key when it is absent (Redis `NX`), so entries are never
    /// refreshed before they expire.
    /// Default: `false`
    #[serde(default)]
    pub write_once: bool,

    /// Connection settings for the Redis backend.
    #[serde(default)]
    pub redis: RedisConfig,
}

/// Connection settings for the Redis cache backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_host")]
    pub host: String,

    #[serde(default = "default_redis_port")]
    pub port: u16,

    #[serde(default)]
    pub password: Option<String>,

    /// Prefix prepended to every cache key.
    /// Default: `places:`
    #[serde(default = "default_redis_prefix")]
    pub prefix: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            verify_tls: true,
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            backend: CacheBackend::default(),
            ttl_seconds: default_ttl_seconds(),
            max_entries: default_max_entries(),
            write_once: false,
            redis: RedisConfig::default(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: default_redis_host(),
            port: default_redis_port(),
            password: None,
            prefix: default_redis_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    super::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_ttl_seconds() -> u64 {
    3600 // 1 hour
}

fn default_max_entries() -> usize {
    1000
}

fn default_redis_host() -> String {
    "127.0.0.1".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_redis_prefix() -> String {
    "places:".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
