//! Store path. Failures are logged and counted, never returned.

use serde::Serialize;
use tokio::fs;
use tracing::{debug, warn};

use crate::entry::CacheEntry;
use crate::error::{CacheError, CacheResult};

use super::super::ValidationCache;
use super::io;

pub(crate) async fn put_by_key_impl<T: Serialize + ?Sized>(
    cache: &ValidationCache,
    key: &str,
    source_label: &str,
    payload: &T,
) {
    match write_entry(cache, key, source_label, payload).await {
        Ok(()) => {
            debug!(key, source = source_label, "cached validation result");
            cache.counters.set();
        }
        Err(error) => {
            warn!(key, %error, "failed to cache validation result");
            cache.counters.error();
        }
    }
}

async fn write_entry<T: Serialize + ?Sized>(
    cache: &ValidationCache,
    key: &str,
    source_label: &str,
    payload: &T,
) -> CacheResult<()> {
    let payload = serde_json::to_value(payload)
        .map_err(|e| CacheError::entry_write(key, format!("failed to serialize payload: {e}")))?;

    let entry = CacheEntry {
        key: key.to_string(),
        created_at: cache.now_ms(),
        producer_version: cache.producer_version.clone(),
        source_label: source_label.to_string(),
        payload,
    };
    let bytes = serde_json::to_vec_pretty(&entry)
        .map_err(|e| CacheError::entry_write(key, format!("failed to serialize entry: {e}")))?;

    // The directory may have been removed out-of-band since open.
    fs::create_dir_all(&cache.storage_dir).await.map_err(|e| {
        CacheError::entry_write(key, format!("failed to create cache directory: {e}"))
    })?;

    io::write_atomic_impl(&cache.storage_dir, key, &bytes).await
}
