// Cache provider abstraction
// Author: kelexine (https://github.com/kelexine)

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// A string key/value store the client can park upstream responses in.
///
/// Implementations must be safe to share between tasks. A missing or expired
/// key is `Ok(None)`, never an error.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Store `value` under `key`. A zero `ttl` keeps the entry until it is
    /// deleted or evicted.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Fetch the value stored under `key`, if present and unexpired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key`. Returns whether an entry was actually removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// TTL applied when the client does not override it.
    fn default_ttl(&self) -> Duration;

    /// Human-readable backend name (for logs).
    fn name(&self) -> &'static str;
}
