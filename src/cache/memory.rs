// In-process LRU cache backend
// Author: kelexine (https://github.com/kelexine)

use super::CacheProvider;
use crate::error::{PlacesError, Result};
use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::trace;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Bounded in-memory cache. Least recently used entries are evicted once
/// `capacity` is reached; writes always overwrite.
pub struct MemoryProvider {
    entries: Mutex<LruCache<String, Entry>>,
    default_ttl: Duration,
}

impl MemoryProvider {
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| PlacesError::Config("cache capacity must be greater than zero".to_string()))?;

        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            default_ttl,
        })
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheProvider for MemoryProvider {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        // a TTL past the end of the clock never expires
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };
        self.entries.lock().put(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        trace!(key, "Stored cache entry");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock();
        let now = Instant::now();

        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
            trace!(key, "Dropped expired cache entry");
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let removed = self.entries.lock().pop(key);
        Ok(removed.is_some_and(|entry| !entry.is_expired(Instant::now())))
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn provider() -> MemoryProvider {
        MemoryProvider::new(2, Duration::from_secs(60)).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(MemoryProvider::new(0, Duration::ZERO).is_err());
    }

    #[test]
    fn test_set_overwrites() {
        let cache = provider();
        block_on(cache.set("k", "first", Duration::ZERO)).unwrap();
        block_on(cache.set("k", "second", Duration::ZERO)).unwrap();
        assert_eq!(block_on(cache.get("k")).unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = provider();
        assert_eq!(block_on(cache.get("absent")).unwrap(), None);
        assert!(!block_on(cache.delete("absent")).unwrap());
    }

    #[test]
    fn test_delete_reports_removal() {
        let cache = provider();
        block_on(cache.set("k", "v", Duration::ZERO)).unwrap();
        assert!(block_on(cache.delete("k")).unwrap());
        assert!(!block_on(cache.delete("k")).unwrap());
    }

    #[test]
    fn test_entry_expires() {
        let cache = provider();
        block_on(cache.set("k", "v", Duration::from_millis(20))).unwrap();
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(block_on(cache.get("k")).unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let cache = MemoryProvider::new(2, Duration::from_secs(u64::MAX)).unwrap();
        block_on(cache.set("k", "v", cache.default_ttl())).unwrap();
        assert_eq!(block_on(cache.get("k")).unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_lru_eviction() {
        let cache = provider();
        block_on(cache.set("a", "1", Duration::ZERO)).unwrap();
        block_on(cache.set("b", "2", Duration::ZERO)).unwrap();
        // touch "a" so "b" becomes least recently used
        block_on(cache.get("a")).unwrap();
        block_on(cache.set("c", "3", Duration::ZERO)).unwrap();

        assert_eq!(block_on(cache.get("b")).unwrap(), None);
        assert_eq!(block_on(cache.get("a")).unwrap(), Some("1".to_string()));
        assert_eq!(cache.len(), 2);
    }
}
