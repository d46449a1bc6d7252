//! Eviction and cleanup.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::stats::{ClearReport, SweepReport};

use super::super::ValidationCache;
use super::io::{self, Loaded};

/// Remove one entry file, counting a delete on success and an error on
/// failure. An already-missing file counts as neither.
pub(crate) async fn remove_counted_impl(cache: &ValidationCache, path: &Path, key: &str) -> bool {
    match io::remove_file_impl(path).await {
        Ok(removed) => {
            if removed {
                cache.counters.delete();
            }
            removed
        }
        Err(error) => {
            warn!(key, %error, "failed to remove cache entry");
            cache.counters.error();
            false
        }
    }
}

pub(crate) async fn clear_expired_impl(cache: &ValidationCache) -> SweepReport {
    let mut report = SweepReport::default();

    let scan = match io::scan_dir_impl(&cache.storage_dir).await {
        Ok(scan) => scan,
        Err(error) => {
            warn!(dir = %cache.storage_dir.display(), %error, "failed to scan cache directory");
            cache.counters.error();
            return report;
        }
    };

    warn_foreign(&scan.foreign);

    let now = cache.now_ms();
    let ttl = cache.ttl_ms();

    for (key, path) in scan.entries {
        let size = match io::read_entry_impl(&path, &key).await {
            Loaded::Missing => continue,
            Loaded::Entry { entry, size } => {
                if !entry.is_expired(now, ttl) {
                    continue;
                }
                size
            }
            Loaded::Corrupt { error, size } => {
                debug!(key = %key, %error, "removing corrupted cache entry");
                size
            }
            Loaded::Unreadable(error) => {
                debug!(key = %key, %error, "removing unreadable cache entry");
                fs::metadata(&path).await.map(|m| m.len()).unwrap_or(0)
            }
        };

        if remove_counted_impl(cache, &path, &key).await {
            report.deleted_count += 1;
            report.bytes_freed += size;
        }
    }

    info!(
        deleted = report.deleted_count,
        bytes_freed = report.bytes_freed,
        "cleared expired cache entries"
    );
    report
}

pub(crate) async fn clear_all_impl(cache: &ValidationCache) -> ClearReport {
    let mut report = ClearReport::default();

    let scan = match io::scan_dir_impl(&cache.storage_dir).await {
        Ok(scan) => scan,
        Err(error) => {
            warn!(dir = %cache.storage_dir.display(), %error, "failed to scan cache directory");
            cache.counters.error();
            return report;
        }
    };

    warn_foreign(&scan.foreign);

    for (key, path) in scan.entries {
        if remove_counted_impl(cache, &path, &key).await {
            report.deleted_count += 1;
        }
    }

    for temp in scan.temps {
        if let Err(error) = io::remove_file_impl(&temp).await {
            debug!(path = %temp.display(), %error, "failed to remove stray temp file");
        }
    }

    info!(deleted = report.deleted_count, "cleared validation cache");
    report
}

fn warn_foreign(foreign: &[PathBuf]) {
    for path in foreign {
        warn!(path = %path.display(), "directory under a cache entry name, leaving it in place");
    }
}
