//! Read-only passes over the store: statistics and listing.

use tracing::warn;

use crate::entry::EntrySummary;
use crate::stats::CacheStatistics;

use super::super::ValidationCache;
use super::io::{self, DirScan, Loaded};

async fn scan_or_empty(cache: &ValidationCache) -> DirScan {
    match io::scan_dir_impl(&cache.storage_dir).await {
        Ok(scan) => scan,
        Err(error) => {
            warn!(dir = %cache.storage_dir.display(), %error, "failed to scan cache directory");
            cache.counters.error();
            DirScan::default()
        }
    }
}

pub(crate) async fn statistics_impl(cache: &ValidationCache) -> CacheStatistics {
    let scan = scan_or_empty(cache).await;
    let now = cache.now_ms();
    let ttl = cache.ttl_ms();

    let mut valid_entries = 0;
    let mut expired_entries = 0;
    let mut corrupt_entries = 0;
    let mut total_size_bytes = 0;

    for (key, path) in &scan.entries {
        match io::read_entry_impl(path, key).await {
            Loaded::Missing => {}
            Loaded::Entry { entry, size } => {
                total_size_bytes += size;
                if entry.is_expired(now, ttl) {
                    expired_entries += 1;
                } else {
                    valid_entries += 1;
                }
            }
            Loaded::Corrupt { size, .. } => {
                total_size_bytes += size;
                corrupt_entries += 1;
            }
            Loaded::Unreadable(_) => corrupt_entries += 1,
        }
    }
    corrupt_entries += scan.foreign.len();

    let session = cache.counters.snapshot();
    CacheStatistics {
        storage_dir: cache.storage_dir.clone(),
        producer_version: cache.producer_version.clone(),
        ttl_ms: u64::try_from(ttl).unwrap_or(0),
        total_entries: valid_entries + expired_entries + corrupt_entries,
        valid_entries,
        expired_entries,
        corrupt_entries,
        total_size_bytes,
        hit_rate: session.hit_rate(),
        session,
    }
}

pub(crate) async fn list_impl(cache: &ValidationCache) -> Vec<EntrySummary> {
    let scan = scan_or_empty(cache).await;
    let now = cache.now_ms();
    let ttl = cache.ttl_ms();

    let mut rows = Vec::with_capacity(scan.entries.len());
    for (key, path) in &scan.entries {
        if let Loaded::Entry { entry, size } = io::read_entry_impl(path, key).await {
            let expired = entry.is_expired(now, ttl);
            rows.push(EntrySummary {
                key: entry.key,
                created_at: entry.created_at,
                producer_version: entry.producer_version,
                source_label: entry.source_label,
                size_bytes: size,
                expired,
            });
        }
    }

    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.key.cmp(&b.key)));
    rows
}
