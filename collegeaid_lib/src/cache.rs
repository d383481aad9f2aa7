//! In-memory TTL cache backed by `DashMap`, fronting upstream queries.

use std::future::Future;
use std::time::Duration;

use dashmap::DashMap;
use serde_json::Value;
use tokio::time::Instant;

/// Default freshness window for cached query results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// A single cached value with the instant it was stored.
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Maps a raw cache key to its canonical form.
pub type KeyNormalizer = fn(&str) -> String;

/// Trims surrounding whitespace and lowercases, so `" GA"` and `"ga"` share an entry.
pub fn default_normalizer(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Time-bounded memoization of query results.
///
/// A read is a hit only while `now - stored_at < ttl`. Stale entries are not
/// evicted in the background; they stay until the same key misses again and
/// is overwritten. Concurrent misses on one key each run their fetch and the
/// last writer wins.
pub struct QueryCache<V = Value> {
    store: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
    normalize: KeyNormalizer,
}

impl<V: Clone> QueryCache<V> {
    /// Creates a cache with the given TTL and the default key normalizer.
    pub fn new(ttl: Duration) -> Self {
        Self::with_normalizer(ttl, default_normalizer)
    }

    pub fn with_normalizer(ttl: Duration, normalize: KeyNormalizer) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
            normalize,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value for `key`, or `None` if missing or stale.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.store.get(&(self.normalize)(key))?;
        if entry.stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites a cache entry, stamped with the current time.
    pub fn set(&self, key: &str, value: V) {
        self.store.insert(
            (self.normalize)(key),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Returns the fresh cached value for `key`, or awaits `fetch`, stores
    /// its result and returns it. Errors from `fetch` are returned as-is and
    /// leave the cache untouched.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key) {
            tracing::debug!("cache hit for {}", key);
            return Ok(hit);
        }
        tracing::debug!("cache miss for {}", key);
        let value = fetch().await?;
        self.set(key, value.clone());
        Ok(value)
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl<V: Clone> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
