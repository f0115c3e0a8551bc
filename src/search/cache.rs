//! Move cache: chosen successor per evaluated position
//!
//! Entries are keyed by state value, written once and never replaced or
//! evicted. Every build fills a fresh cache which the engine then merges
//! into its long-lived one.
//!
//! # Example
//!
//! ```
//! use minimax::search::MoveCache;
//!
//! let mut cache = MoveCache::new();
//! assert!(cache.store(1u8, 2u8));
//! assert!(!cache.store(1, 3)); // first choice stays
//!
//! assert_eq!(cache.lookup(&1), Some(&2));
//! assert_eq!(cache.lookup(&7), None);
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Cache usage counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Probes that found an entry
    pub hits: u64,
    /// Probes that found nothing
    pub misses: u64,
    /// Entries written
    pub stores: u64,
}

impl CacheStats {
    /// Hit rate in percent
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64 * 100.0
        }
    }
}

/// Mapping from a position to the successor chosen for it.
#[derive(Debug, Clone)]
pub struct MoveCache<S> {
    entries: HashMap<S, S>,
    stats: CacheStats,
}

impl<S: Clone + Eq + Hash> MoveCache<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Look up the move for `state`, counting the hit or miss.
    pub fn lookup(&mut self, state: &S) -> Option<&S> {
        match self.entries.get(state) {
            Some(next) => {
                self.stats.hits += 1;
                Some(next)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Look up the move for `state` without touching the counters.
    #[inline]
    pub fn get(&self, state: &S) -> Option<&S> {
        self.entries.get(state)
    }

    #[inline]
    pub fn contains(&self, state: &S) -> bool {
        self.entries.contains_key(state)
    }

    /// Record `next` as the move for `state`.
    ///
    /// Returns false, keeping the existing choice, if `state` already has one.
    pub fn store(&mut self, state: S, next: S) -> bool {
        match self.entries.entry(state) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(next);
                self.stats.stores += 1;
                true
            }
        }
    }

    /// Move every entry of `other` that is new to this cache.
    /// Returns the number of entries added.
    pub fn merge(&mut self, other: MoveCache<S>) -> usize {
        let mut added = 0;
        for (state, next) in other.entries {
            if self.store(state, next) {
                added += 1;
            }
        }
        added
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Usage counters since creation
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// All (state, move) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&S, &S)> {
        self.entries.iter()
    }
}

impl<S: Clone + Eq + Hash> Default for MoveCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_lookup() {
        let mut cache = MoveCache::new();
        assert!(cache.is_empty());
        assert!(cache.store("a", "b"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup(&"a"), Some(&"b"));
        assert!(cache.contains(&"a"));
    }

    #[test]
    fn test_store_never_overwrites() {
        let mut cache = MoveCache::new();
        cache.store(1, 10);
        assert!(!cache.store(1, 11));
        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.stats().stores, 1);
    }

    #[test]
    fn test_merge_keeps_existing_entries() {
        let mut long_lived = MoveCache::new();
        long_lived.store(1, 10);

        let mut fresh = MoveCache::new();
        fresh.store(1, 99);
        fresh.store(2, 20);
        fresh.store(3, 30);

        assert_eq!(long_lived.merge(fresh), 2);
        assert_eq!(long_lived.len(), 3);
        assert_eq!(long_lived.get(&1), Some(&10));
        assert_eq!(long_lived.get(&3), Some(&30));
    }

    #[test]
    fn test_hit_rate() {
        let mut cache = MoveCache::new();
        assert_eq!(cache.stats().hit_rate(), 0.0);
        cache.store(1, 2);
        let _ = cache.lookup(&1);
        let _ = cache.lookup(&1);
        let _ = cache.lookup(&1);
        let _ = cache.lookup(&5);
        assert!((cache.stats().hit_rate() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_get_does_not_count() {
        let mut cache = MoveCache::new();
        cache.store(1, 2);
        let _ = cache.get(&1);
        let _ = cache.get(&3);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 0);
    }
}
