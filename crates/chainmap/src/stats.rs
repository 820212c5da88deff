//! Map operation statistics

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for map operations
#[derive(Debug, Default)]
pub struct MapStats {
    inserts: AtomicU64,
    updates: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    removals: AtomicU64,
    absent_deletes: AtomicU64,
}

impl MapStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a put that added a new key
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a put that overwrote an existing key
    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that found its key
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that missed
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delete that removed an entry
    pub fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delete of a key that was not present
    pub fn record_absent_delete(&self) {
        self.absent_deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Total puts
    pub fn puts(&self) -> u64 {
        self.inserts() + self.updates()
    }

    /// Puts that added a new key
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Puts that overwrote an existing key
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Total lookups
    pub fn gets(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Lookups that found their key
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that missed
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Total deletes
    pub fn deletes(&self) -> u64 {
        self.removals() + self.absent_deletes.load(Ordering::Relaxed)
    }

    /// Deletes that removed an entry
    pub fn removals(&self) -> u64 {
        self.removals.load(Ordering::Relaxed)
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.updates.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.removals.store(0, Ordering::Relaxed);
        self.absent_deletes.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = MapStats::new();

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.gets(), 3);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_stats_writes() {
        let stats = MapStats::new();

        stats.record_insert();
        stats.record_update();
        stats.record_update();
        stats.record_removal();
        stats.record_absent_delete();

        assert_eq!(stats.puts(), 3);
        assert_eq!(stats.inserts(), 1);
        assert_eq!(stats.updates(), 2);
        assert_eq!(stats.deletes(), 2);
        assert_eq!(stats.removals(), 1);
    }

    #[test]
    fn test_stats_reset() {
        let stats = MapStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.record_insert();
        stats.reset();

        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.puts(), 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }
}
