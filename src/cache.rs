//! Keyed time-to-live cache in front of outbound requests.
//!
//! An entry is valid strictly while `now - stored_at < ttl`. Expired entries
//! are treated as absent and overwritten on the next fetch; nothing sweeps
//! them proactively. The lock is never held across a fetch, so two concurrent
//! misses on the same key both reach upstream and the later write wins.

use crate::shared::{Clock, SystemClock};

use async_lock::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// Default entry lifetime.
pub const DEFAULT_TTL_MS: u64 = 30_000;

/// Cache policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime in milliseconds.
    pub ttl_ms: u64,
    /// Upper bound on distinct keys; the oldest entry is evicted to make room.
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            max_entries: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

/// The fixed key space of the market data client: one key per endpoint class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Coins,
    Global,
    Trending,
}

impl CacheKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Coins => "coins",
            CacheKey::Global => "global",
            CacheKey::Trending => "trending",
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at_ms: i64,
}

/// Typed TTL cache.
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now_ms: i64) -> bool {
        let ttl_ms = i64::try_from(self.config.ttl_ms).unwrap_or(i64::MAX);
        now_ms.saturating_sub(entry.stored_at_ms) < ttl_ms
    }

    /// The cached value for `key`, if present and unexpired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now_ms();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key` stamped with the current time.
    pub async fn insert(&self, key: K, value: V) {
        let now = self.clock.now_ms();
        let mut entries = self.entries.write().await;

        if let Some(max) = self.config.max_entries {
            if !entries.contains_key(&key) && entries.len() >= max.max(1) {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.stored_at_ms)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    tracing::debug!(key = ?oldest, "Evicting oldest cache entry");
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at_ms: now,
            },
        );
    }

    /// Return the fresh entry for `key` or run `fetch`, store its result and
    /// return it. Fetch errors are propagated and nothing is stored.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(key = ?key, "Cache hit");
            return Ok(value);
        }

        tracing::debug!(key = ?key, "Cache miss");
        let value = fetch().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Remove one entry.
    pub async fn invalidate(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    /// Remove all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::block_on;

    fn cache_with_clock(config: CacheConfig) -> (TtlCache<CacheKey, u32>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let cache = TtlCache::with_clock(config, Arc::new(clock.clone()));
        (cache, clock)
    }

    async fn counted_fetch(calls: &AtomicUsize, value: u32) -> Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[test]
    fn test_get_or_fetch_within_ttl_fetches_once() {
        let (cache, clock) = cache_with_clock(CacheConfig::default());
        let calls = AtomicUsize::new(0);

        block_on(async {
            let a = cache
                .get_or_fetch(CacheKey::Coins, || counted_fetch(&calls, 1))
                .await
                .unwrap();
            clock.advance(Duration::from_secs(29));
            let b = cache
                .get_or_fetch(CacheKey::Coins, || counted_fetch(&calls, 2))
                .await
                .unwrap();
            assert_eq!(a, 1);
            assert_eq!(b, 1);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_get_or_fetch_after_ttl_refetches() {
        let (cache, clock) = cache_with_clock(CacheConfig::default());
        let calls = AtomicUsize::new(0);

        block_on(async {
            cache
                .get_or_fetch(CacheKey::Coins, || counted_fetch(&calls, 1))
                .await
                .unwrap();
            // Exactly at the TTL boundary the entry is already stale.
            clock.advance(Duration::from_secs(30));
            let v = cache
                .get_or_fetch(CacheKey::Coins, || counted_fetch(&calls, 2))
                .await
                .unwrap();
            assert_eq!(v, 2);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fetch_error_is_not_cached() {
        let (cache, _clock) = cache_with_clock(CacheConfig::default());

        block_on(async {
            let err = cache
                .get_or_fetch(CacheKey::Global, || async { Err::<u32, _>("boom") })
                .await;
            assert_eq!(err, Err("boom"));
            assert!(cache.is_empty().await);
        });
    }

    #[test]
    fn test_keys_are_independent() {
        let (cache, _clock) = cache_with_clock(CacheConfig::default());

        block_on(async {
            cache.insert(CacheKey::Coins, 1).await;
            cache.insert(CacheKey::Global, 2).await;
            assert_eq!(cache.get(&CacheKey::Coins).await, Some(1));
            assert_eq!(cache.get(&CacheKey::Global).await, Some(2));
            assert_eq!(cache.get(&CacheKey::Trending).await, None);
        });
    }

    #[test]
    fn test_invalidate_one_and_clear_all() {
        let (cache, _clock) = cache_with_clock(CacheConfig::default());

        block_on(async {
            cache.insert(CacheKey::Coins, 1).await;
            cache.insert(CacheKey::Global, 2).await;
            cache.invalidate(&CacheKey::Coins).await;
            assert_eq!(cache.get(&CacheKey::Coins).await, None);
            assert_eq!(cache.get(&CacheKey::Global).await, Some(2));

            cache.clear().await;
            assert!(cache.is_empty().await);
        });
    }

    #[test]
    fn test_expired_entries_are_not_swept() {
        let (cache, clock) = cache_with_clock(CacheConfig::default());

        block_on(async {
            cache.insert(CacheKey::Trending, 7).await;
            clock.advance(Duration::from_secs(60));
            assert_eq!(cache.get(&CacheKey::Trending).await, None);
            assert_eq!(cache.len().await, 1);
        });
    }

    #[test]
    fn test_max_entries_evicts_oldest() {
        let (cache, clock) = cache_with_clock(CacheConfig {
            ttl_ms: 60_000,
            max_entries: Some(2),
        });

        block_on(async {
            cache.insert(CacheKey::Coins, 1).await;
            clock.advance(Duration::from_millis(10));
            cache.insert(CacheKey::Global, 2).await;
            clock.advance(Duration::from_millis(10));
            cache.insert(CacheKey::Trending, 3).await;

            assert_eq!(cache.len().await, 2);
            assert_eq!(cache.get(&CacheKey::Coins).await, None);
            assert_eq!(cache.get(&CacheKey::Trending).await, Some(3));

            // Overwriting an existing key never evicts.
            cache.insert(CacheKey::Global, 20).await;
            assert_eq!(cache.len().await, 2);
            assert_eq!(cache.get(&CacheKey::Global).await, Some(20));
        });
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let (cache, clock) = cache_with_clock(CacheConfig {
            ttl_ms: u64::MAX,
            max_entries: None,
        });

        block_on(async {
            cache.insert(CacheKey::Coins, 1).await;
            assert_eq!(cache.get(&CacheKey::Coins).await, Some(1));
            clock.advance(Duration::from_secs(365 * 24 * 3600));
            assert_eq!(cache.get(&CacheKey::Coins).await, Some(1));
        });
    }

    #[test]
    fn test_cache_config_serde_defaults() {
        let config: CacheConfig = serde_json::from_str(r#"{"max_entries": 8}"#).unwrap();
        assert_eq!(config.ttl_ms, DEFAULT_TTL_MS);
        assert_eq!(config.max_entries, Some(8));
        assert_eq!(config.ttl(), Duration::from_secs(30));
    }
}
