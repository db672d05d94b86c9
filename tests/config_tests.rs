// Configuration loading tests
// Author: kelexine (https://github.com/kelexine)

use places_api::config::{AppConfig, CacheBackend};
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

#[test]
fn test_load_from_file() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[places]
api_key = "file-key"
verify_tls = false

[cache]
enabled = true
backend = "redis"
ttl_seconds = 90

[cache.redis]
host = "cache.internal"
port = 6380
password = "hunter2"
prefix = "test:"
"#
    )
    .unwrap();

    let config = AppConfig::load_from(Some(file.path())).unwrap();

    assert_eq!(config.places.api_key.as_deref(), Some("file-key"));
    assert!(!config.places.verify_tls);
    assert!(config.cache.enabled);
    assert_eq!(config.cache.backend, CacheBackend::Redis);
    assert_eq!(config.cache.ttl_seconds, 90);
    assert_eq!(config.cache.redis.host, "cache.internal");
    assert_eq!(config.cache.redis.port, 6380);
    assert_eq!(config.cache.redis.password.as_deref(), Some("hunter2"));
    assert_eq!(config.cache.redis.prefix, "test:");
    // untouched sections keep their defaults
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.cache.max_entries, 1000);
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let result = AppConfig::load_from(Some(Path::new("/nonexistent/places/config.toml")));
    assert!(result.is_err());
}

#[test]
fn test_sample_config_parses() {
    let sample = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/places.example.toml");
    let config = AppConfig::load_from(Some(&sample)).unwrap();

    assert!(!config.cache.enabled);
    assert_eq!(config.cache.redis.prefix, "test:");
}
