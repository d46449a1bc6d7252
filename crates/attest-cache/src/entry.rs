//! Persisted cache record.

use serde::{Deserialize, Serialize};

/// One persisted validation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Content-addressed key this record is stored under.
    pub key: String,

    /// Write time, milliseconds since the Unix epoch.
    pub created_at: i64,

    /// Version of the logic that produced the payload.
    pub producer_version: String,

    /// Human-readable input identifier. Not part of the key.
    pub source_label: String,

    /// Opaque result.
    pub payload: serde_json::Value,
}

/// One row of a store listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySummary {
    pub key: String,
    pub created_at: i64,
    pub producer_version: String,
    pub source_label: String,
    pub size_bytes: u64,
    pub expired: bool,
}

/// Why an entry can or cannot be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Valid,
    Expired,
    VersionMismatch,
}

impl CacheEntry {
    /// Age relative to `now_ms`. Entries stamped in the future have age zero.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.created_at).max(0)
    }

    /// TTL check only: expired iff `now - created_at > ttl`.
    pub fn is_expired(&self, now_ms: i64, ttl_ms: i64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }

    /// Full validity check used on lookup. Expiry is reported before version skew.
    pub fn freshness(&self, now_ms: i64, ttl_ms: i64, producer_version: &str) -> Freshness {
        if self.is_expired(now_ms, ttl_ms) {
            Freshness::Expired
        } else if self.producer_version != producer_version {
            Freshness::VersionMismatch
        } else {
            Freshness::Valid
        }
    }
}
