//! Response caching for the places client.
//!
//! Provides the [`CacheProvider`] trait with two implementations:
//! - [`MemoryProvider`] - bounded in-process LRU map
//! - [`RedisProvider`] - remote Redis server
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod key;
mod memory;
mod provider;
mod redis_cache;

pub use self::key::cache_key;
pub use self::memory::MemoryProvider;
pub use self::provider::CacheProvider;
pub use self::redis_cache::RedisProvider;

use crate::config::{CacheBackend, CacheConfig};
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the backend described by `config`, or `None` when caching is off.
pub async fn from_config(config: &CacheConfig) -> Result<Option<Arc<dyn CacheProvider>>> {
    if !config.enabled {
        return Ok(None);
    }

    let ttl = Duration::from_secs(config.ttl_seconds);
    let provider: Arc<dyn CacheProvider> = match config.backend {
        CacheBackend::Memory => Arc::new(MemoryProvider::new(config.max_entries, ttl)?),
        CacheBackend::Redis => Arc::new(
            RedisProvider::connect(&config.redis, ttl)
                .await?
                .write_once(config.write_once),
        ),
    };

    info!(backend = provider.name(), ttl_seconds = config.ttl_seconds, "Response cache enabled");
    Ok(Some(provider))
}
