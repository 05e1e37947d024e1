//! Caching layer for Roster.
//!
//! A single bounded, insertion-ordered cache sits between the record service
//! and the store.
//!
//! # Thread-Safety
//!
//! The key map and the insertion queue live behind one `parking_lot::RwLock`,
//! so an eviction and the insertion that caused it are a single critical
//! section. Statistics are atomics and can be read without the lock.

mod bounded;

pub use bounded::{BoundedCache, CacheMiss, CacheStats};
