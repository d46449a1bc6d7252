//! Session counters and reports.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Per-instance operation counters.
///
/// Counters only grow for the lifetime of the owning cache; clones of a
/// cache share one set through an `Arc`.
#[derive(Debug, Default)]
pub(crate) struct SessionCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
    errors: AtomicU64,
}

impl SessionCounters {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub errors: u64,
}

impl CounterSnapshot {
    /// `hits / (hits + misses)`, or `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Outcome of `clear_expired`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub deleted_count: usize,
    pub bytes_freed: u64,
}

/// Outcome of `clear_all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClearReport {
    pub deleted_count: usize,
}

/// Snapshot of the store and the session counters.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatistics {
    pub storage_dir: PathBuf,
    pub producer_version: String,
    pub ttl_ms: u64,
    /// `valid_entries + expired_entries + corrupt_entries`.
    pub total_entries: usize,
    pub valid_entries: usize,
    /// Expired by TTL. Version mismatches are not checked here.
    pub expired_entries: usize,
    pub corrupt_entries: usize,
    pub total_size_bytes: u64,
    pub hit_rate: f64,
    pub session: CounterSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_is_zero_without_lookups() {
        assert_eq!(CounterSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_is_hits_over_lookups() {
        let counters = SessionCounters::default();
        for _ in 0..3 {
            counters.hit();
        }
        counters.miss();
        counters.set();
        counters.error();

        let snap = counters.snapshot();
        assert_eq!(snap.hits, 3);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.sets, 1);
        assert_eq!(snap.errors, 1);
        assert_eq!(snap.deletes, 0);
        assert!((snap.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
