//! Expiring Store Module
//!
//! Key-value storage with per-entry optional expiry. Expired entries are
//! purged lazily when a read touches them; there is no background sweep.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheError, CacheStats, Clock, SystemClock, MAX_KEY_LENGTH};

/// Store shared across request handlers.
pub type SharedStore<V> = Arc<RwLock<ExpiringStore<V>>>;

// == Expiring Store ==
/// In-memory key-value store with lazy TTL expiry and a hard capacity.
#[derive(Debug)]
pub struct ExpiringStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Time source for expiry decisions
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ExpiringStore<V> {
    // == Constructor ==
    /// Creates a store on the system clock.
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, Arc::new(SystemClock))
    }

    /// Creates a store on an injected clock.
    pub fn with_clock(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
            clock,
        }
    }

    /// Wraps the store for sharing across tasks.
    pub fn into_shared(self) -> SharedStore<V> {
        Arc::new(RwLock::new(self))
    }

    // == Set ==
    /// Stores a value, replacing any previous entry under the same key.
    ///
    /// A TTL that is absent, zero or negative stores the value without
    /// expiry. When the store is full, expired entries are purged first; if
    /// it is still full the write is refused.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: V,
        ttl_seconds: Option<i64>,
    ) -> Result<(), CacheError> {
        let key = key.into();
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::KeyTooLong {
                len: key.len(),
                max: MAX_KEY_LENGTH,
            });
        }

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.max_entries {
            self.purge_expired();
            if self.entries.len() >= self.max_entries {
                return Err(CacheError::StoreFull(self.max_entries));
            }
        }

        let entry = CacheEntry::new(value, ttl_seconds, self.clock.now_ms());
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Returns the value if present and not expired.
    ///
    /// An expired entry is removed as a side effect and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => {
                self.entries.remove(key);
                self.stats.record_expired(1);
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Contains ==
    /// Returns true if a live entry exists; purges it if it has expired.
    pub fn contains(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes an entry. Returns true if something was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == TTL Remaining ==
    /// Remaining lifetime of a live entry in whole seconds.
    ///
    /// Returns `None` when the key is absent or expired, `Some(None)` when the
    /// entry never expires.
    pub fn ttl_remaining(&self, key: &str) -> Option<Option<u64>> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining_ms(now).map(|ms| ms / 1000))
    }

    // == Purge Expired ==
    /// Removes every expired entry. Returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
