//! Bounded FIFO cache.
//!
//! Thread-safe, fixed-capacity cache that evicts by insertion order only.
//! Reads never reorder entries and replacing the value of a resident key
//! keeps its original position in the queue.

#![allow(clippy::cast_precision_loss)] // Precision loss acceptable for hit rate calculation

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Returned by [`BoundedCache::get`] and [`BoundedCache::remove`] when the key
/// is not resident.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[ROSTER-007] No cached value for key {key:?}")]
pub struct CacheMiss<K> {
    /// The key that was looked up.
    pub key: K,
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of evictions.
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe bounded cache with FIFO eviction.
pub struct BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Maximum number of resident entries.
    capacity: usize,
    /// Map and queue are updated together under one lock.
    inner: RwLock<FifoInner<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

struct FifoInner<K, V> {
    /// Key -> Value map.
    map: FxHashMap<K, V>,
    /// Insertion order (front = oldest).
    order: VecDeque<K>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Create a new cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedCache capacity must be at least 1");
        Self {
            capacity,
            inner: RwLock::new(FifoInner {
                map: FxHashMap::default(),
                order: VecDeque::with_capacity(capacity),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Get the capacity of the cache.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().map.is_empty()
    }

    /// Whether `key` is resident. Does not touch hit/miss counters.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().map.contains_key(key)
    }

    /// Snapshot of resident keys, oldest first.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().order.iter().cloned().collect()
    }

    /// Snapshot of resident entries, oldest first.
    ///
    /// Unlike [`get`](Self::get), this leaves the hit and miss counters alone.
    #[must_use]
    pub fn entries(&self) -> Vec<(K, V)> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|k| inner.map.get(k).map(|v| (k.clone(), v.clone())))
            .collect()
    }

    /// Get a copy of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheMiss`] if the key is not resident.
    pub fn get(&self, key: &K) -> Result<V, CacheMiss<K>> {
        let inner = self.inner.read();

        if let Some(value) = inner.map.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Ok(value.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            Err(CacheMiss { key: key.clone() })
        }
    }

    /// Store `value` under `key` and return it.
    ///
    /// Replacing a resident key keeps its queue position. A new key arriving
    /// at capacity evicts the oldest entry first.
    pub fn put(&self, key: K, value: V) -> V {
        let mut inner = self.inner.write();

        if let Some(slot) = inner.map.get_mut(&key) {
            *slot = value.clone();
            return value;
        }

        if inner.map.len() >= self.capacity {
            if let Some(evicted_key) = inner.order.pop_front() {
                inner.map.remove(&evicted_key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(key = ?evicted_key, "evicted oldest cache entry");
            }
        }

        inner.map.insert(key.clone(), value.clone());
        inner.order.push_back(key);
        value
    }

    /// Remove `key` and return its value.
    ///
    /// # Errors
    ///
    /// Returns [`CacheMiss`] if the key is not resident.
    pub fn remove(&self, key: &K) -> Result<V, CacheMiss<K>> {
        let mut inner = self.inner.write();

        match inner.map.remove(key) {
            Some(value) => {
                inner.order.retain(|k| k != key);
                Ok(value)
            }
            None => Err(CacheMiss { key: key.clone() }),
        }
    }

    /// Clear all entries.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.map.clear();
        inner.order.clear();
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

impl<K, V> Debug for BoundedCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("capacity", &self.capacity)
            .field("keys", &self.keys())
            .finish_non_exhaustive()
    }
}
