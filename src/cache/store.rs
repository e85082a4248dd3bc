// In-memory cache store with a fixed TTL.
// Entries are checked for staleness lazily on read; nothing is evicted in the background.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clock::Clock;

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was fetched.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T, cached_at: DateTime<Utc>) -> Self {
        Self { data, cached_at }
    }

    /// Expired once `ttl` or more has elapsed since caching.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let elapsed = now
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed >= ttl
    }

    pub fn is_valid(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        !self.is_expired(ttl, now)
    }
}

/// Counters reported by the health endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn merge(self, other: CacheStats) -> CacheStats {
        CacheStats {
            entries: self.entries + other.entries,
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
        }
    }
}

/// Key/value store whose entries are only served while younger than the TTL.
///
/// The map lock is held only for the lookup or insert, never across a fetch,
/// so concurrent misses for one key may both fetch; the last `set` wins.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CachedData<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Value for `key` if it was set less than one TTL ago.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        match entries.get(key) {
            Some(cached) if cached.is_valid(self.ttl, now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(cached.data.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let cached = CachedData::new(value, self.clock.now());
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), cached);
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;

    #[derive(Debug, Clone, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn test_cache(ttl_secs: u64) -> (Arc<ManualClock>, TtlCache<TestData>) {
        let clock = Arc::new(ManualClock::default());
        let cache = TtlCache::new(Duration::from_secs(ttl_secs), clock.clone());
        (clock, cache)
    }

    fn sample() -> TestData {
        TestData {
            name: "test".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_get_missing_key() {
        let (_clock, cache) = test_cache(300);
        assert!(cache.get("repos:nobody").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_get_within_ttl_is_stable() {
        let (clock, cache) = test_cache(300);
        cache.set("repos:someone", sample());

        let first = cache.get("repos:someone");
        clock.advance(Duration::from_secs(299));
        let second = cache.get("repos:someone");

        assert_eq!(first, Some(sample()));
        assert_eq!(first, second);
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let (clock, cache) = test_cache(300);
        cache.set("repos:someone", sample());

        clock.advance(Duration::from_secs(300));
        assert!(cache.get("repos:someone").is_none());

        // Stale entries linger until replaced
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_replaces_and_restarts_ttl() {
        let (clock, cache) = test_cache(300);
        cache.set("k", sample());
        clock.advance(Duration::from_secs(400));

        let updated = TestData {
            name: "new".to_string(),
            value: 7,
        };
        cache.set("k", updated.clone());

        assert_eq!(cache.get("k"), Some(updated));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let (_clock, cache) = test_cache(300);
        cache.set("languages:someone/a", sample());

        assert!(cache.get("languages:someone/b").is_none());
        assert!(cache.get("languages:someone/a").is_some());
    }

    #[test]
    fn test_cached_data_clock_skew_counts_as_expired() {
        let now = Utc::now();
        let cached = CachedData::new("x", now + chrono::Duration::seconds(60));

        assert!(cached.is_expired(Duration::from_secs(300), now));
    }

    #[test]
    fn test_stats_merge() {
        let a = CacheStats {
            entries: 1,
            hits: 2,
            misses: 3,
        };
        let b = CacheStats {
            entries: 4,
            hits: 5,
            misses: 6,
        };
        assert_eq!(
            a.merge(b),
            CacheStats {
                entries: 5,
                hits: 7,
                misses: 9
            }
        );
    }
}
