//! Capacity-bounded elevation cache with LRU eviction.
//!
//! Results are cached per grid cell, including failures. A cell whose lookup
//! failed is stored as an explicit "no value" entry and is not retried for the
//! lifetime of the cache, which bounds retries against a rate-limited service.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, trace};

use super::client::ElevationClient;
use super::config::ElevationConfig;
use super::key::CacheKey;

/// Entry in the elevation cache.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    /// Cached elevation; `None` is a cached failure.
    value: Option<f64>,
    /// Logical access tick for LRU eviction.
    last_access: u64,
}

/// Counters describing cache behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElevationCacheStats {
    /// Lookups answered from the cache (values and cached failures).
    pub hits: u64,
    /// Lookups that went to the remote service.
    pub misses: u64,
    /// Failed remote lookups stored as "no value".
    pub failures_cached: u64,
    /// Entries removed to stay within capacity.
    pub evictions: u64,
    /// Current number of entries.
    pub entries: usize,
}

impl ElevationCacheStats {
    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    tick: u64,
    stats: ElevationCacheStats,
}

impl CacheState {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// Elevation cache wrapping an [`ElevationClient`].
///
/// Safe to share between concurrent refreshes: the map and its recency
/// bookkeeping live behind a single mutex that is never held across the
/// remote call. Two concurrent misses for the same cell may both reach the
/// service; the later result overwrites the earlier one.
pub struct ElevationCache<C: ElevationClient> {
    client: C,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl<C: ElevationClient> ElevationCache<C> {
    /// Create a cache holding at most `capacity` cells.
    pub fn new(client: C, capacity: usize) -> Self {
        Self {
            client,
            capacity,
            state: Mutex::new(CacheState {
                entries: HashMap::with_capacity(capacity.min(1024) + 1),
                tick: 0,
                stats: ElevationCacheStats::default(),
            }),
        }
    }

    /// Create a cache sized from configuration.
    pub fn from_config(client: C, config: &ElevationConfig) -> Self {
        Self::new(client, config.capacity)
    }

    /// Look up the terrain elevation at a coordinate.
    ///
    /// Never fails: network and parse errors yield `None` and are cached.
    pub async fn lookup(&self, latitude: f64, longitude: f64) -> Option<f64> {
        let key = CacheKey::from_coordinates(latitude, longitude);

        if let Some(cached) = self.get(&key) {
            trace!(key = %key, cached_failure = cached.is_none(), "Elevation cache hit");
            return cached;
        }

        let value = match self.client.fetch_elevation(latitude, longitude).await {
            Ok(elevation) => Some(elevation),
            Err(e) => {
                debug!(key = %key, error = %e, "Elevation lookup failed, caching failure");
                None
            }
        };

        self.put(key, value);
        value
    }

    /// Return the cached value for a cell without touching its recency.
    ///
    /// The outer `Option` is `None` when the cell was never queried; the inner
    /// one is `None` for a cached failure.
    pub fn peek(&self, latitude: f64, longitude: f64) -> Option<Option<f64>> {
        let key = CacheKey::from_coordinates(latitude, longitude);
        self.state().entries.get(&key).map(|e| e.value)
    }

    /// Check whether the cell containing a coordinate is cached.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.peek(latitude, longitude).is_some()
    }

    /// Current number of cached cells.
    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached cells.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> ElevationCacheStats {
        let state = self.state();
        ElevationCacheStats {
            entries: state.entries.len(),
            ..state.stats
        }
    }

    /// Drop all entries (counters are kept).
    pub fn clear(&self) {
        self.state().entries.clear();
    }

    /// Get a cached value and mark it as recently used.
    fn get(&self, key: &CacheKey) -> Option<Option<f64>> {
        let mut state = self.state();
        let tick = state.next_tick();

        let cached = state.entries.get_mut(key).map(|entry| {
            entry.last_access = tick;
            entry.value
        });

        if cached.is_some() {
            state.stats.hits += 1;
        } else {
            state.stats.misses += 1;
        }
        cached
    }

    /// Store a value, evicting least recently used cells past capacity.
    fn put(&self, key: CacheKey, value: Option<f64>) {
        let mut state = self.state();
        let tick = state.next_tick();

        state.entries.insert(
            key,
            CacheEntry {
                value,
                last_access: tick,
            },
        );
        if value.is_none() {
            state.stats.failures_cached += 1;
        }

        while state.entries.len() > self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(k, _)| *k);

            match oldest {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                    state.stats.evictions += 1;
                    trace!(key = %oldest, "Evicted elevation cache entry");
                }
                None => break,
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation::ElevationError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Mock client returning `lat + lon` or a scripted failure, counting calls.
    #[derive(Default)]
    struct MockClient {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockClient {
        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ElevationClient for MockClient {
        async fn fetch_elevation(&self, latitude: f64, longitude: f64) -> Result<f64, ElevationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ElevationError::Http("connection refused".into()))
            } else {
                Ok(latitude + longitude)
            }
        }
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = ElevationCache::new(MockClient::default(), 10);

        assert_eq!(cache.lookup(1.0, 2.0).await, Some(3.0));
        assert_eq!(cache.lookup(1.0, 2.0).await, Some(3.0));

        assert_eq!(cache.client.calls(), 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_same_cell_shares_entry() {
        let cache = ElevationCache::new(MockClient::default(), 10);

        let first = cache.lookup(31.2304, 121.4737).await;
        let second = cache.lookup(31.2309, 121.4731).await;

        // The second coordinate is served from the first coordinate's entry.
        assert_eq!(first, second);
        assert_eq!(cache.client.calls(), 1);
        assert!(cache.contains(31.2301, 121.4739));
    }

    #[tokio::test]
    async fn test_failure_is_cached() {
        let cache = ElevationCache::new(MockClient::failing(), 10);

        assert_eq!(cache.lookup(10.0, 20.0).await, None);
        assert_eq!(cache.peek(10.0, 20.0), Some(None));
        assert_eq!(cache.peek(11.0, 20.0), None);

        assert_eq!(cache.lookup(10.0, 20.0).await, None);
        assert_eq!(cache.client.calls(), 1);
        assert_eq!(cache.stats().failures_cached, 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let cache = ElevationCache::new(MockClient::default(), 3);

        cache.lookup(1.0, 0.0).await;
        cache.lookup(2.0, 0.0).await;
        cache.lookup(3.0, 0.0).await;
        assert_eq!(cache.len(), 3);

        cache.lookup(4.0, 0.0).await;

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(1.0, 0.0));
        assert!(cache.contains(2.0, 0.0));
        assert!(cache.contains(3.0, 0.0));
        assert!(cache.contains(4.0, 0.0));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[tokio::test]
    async fn test_access_refreshes_recency() {
        let cache = ElevationCache::new(MockClient::default(), 3);

        cache.lookup(1.0, 0.0).await;
        cache.lookup(2.0, 0.0).await;
        cache.lookup(3.0, 0.0).await;

        // Touch the oldest entry; the next insert must evict 2.0 instead.
        cache.lookup(1.0, 0.0).await;
        cache.lookup(4.0, 0.0).await;

        assert!(cache.contains(1.0, 0.0));
        assert!(!cache.contains(2.0, 0.0));
        assert_eq!(cache.client.calls(), 4);
    }

    #[tokio::test]
    async fn test_evicted_cell_is_fetched_again() {
        let cache = ElevationCache::new(MockClient::default(), 1);

        cache.lookup(1.0, 0.0).await;
        cache.lookup(2.0, 0.0).await;
        cache.lookup(1.0, 0.0).await;

        assert_eq!(cache.client.calls(), 3);
    }

    #[tokio::test]
    async fn test_peek_does_not_refresh_recency() {
        let cache = ElevationCache::new(MockClient::default(), 2);

        cache.lookup(1.0, 0.0).await;
        cache.lookup(2.0, 0.0).await;
        assert_eq!(cache.peek(1.0, 0.0), Some(Some(1.0)));
        cache.lookup(3.0, 0.0).await;

        assert!(!cache.contains(1.0, 0.0));
    }

    #[tokio::test]
    async fn test_default_capacity_bound() {
        let cache = ElevationCache::from_config(MockClient::default(), &ElevationConfig::default());

        for i in 0..301 {
            cache.lookup(i as f64 * 0.01, 0.0).await;
        }

        assert_eq!(cache.len(), 300);
        assert_eq!(cache.capacity(), 300);
        assert!(!cache.contains(0.0, 0.0));
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_cache() {
        let client = Arc::new(MockClient::default());
        let cache = Arc::new(ElevationCache::new(Arc::clone(&client), 50));

        let mut handles = Vec::new();
        for i in 0..20 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache.lookup((i % 5) as f64, 0.0).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }

        assert_eq!(cache.len(), 5);
        assert!(client.calls() >= 5);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ElevationCache::new(MockClient::default(), 10);
        cache.lookup(1.0, 0.0).await;
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_hit_rate() {
        let stats = ElevationCacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(ElevationCacheStats::default().hit_rate(), 0.0);
    }
}
