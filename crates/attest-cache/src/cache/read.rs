//! Lookup path.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::entry::Freshness;

use super::super::ValidationCache;
use super::io::{self, Loaded};
use super::evict;

pub(crate) async fn get_by_key_impl<T: DeserializeOwned>(
    cache: &ValidationCache,
    key: &str,
) -> Option<T> {
    let path = cache.entry_path(key);

    let entry = match io::read_entry_impl(&path, key).await {
        Loaded::Missing => {
            debug!(key, "cache miss");
            cache.counters.miss();
            return None;
        }
        Loaded::Unreadable(error) => {
            warn!(key, %error, "cache entry unreadable, treating as miss");
            cache.counters.error();
            cache.counters.miss();
            return None;
        }
        Loaded::Corrupt { error, .. } => {
            warn!(key, %error, "cache entry corrupted, purging");
            cache.counters.error();
            cache.counters.miss();
            evict::remove_counted_impl(cache, &path, key).await;
            return None;
        }
        Loaded::Entry { entry, .. } => entry,
    };

    match entry.freshness(cache.now_ms(), cache.ttl_ms(), &cache.producer_version) {
        Freshness::Valid => {}
        Freshness::Expired => {
            debug!(key, created_at = entry.created_at, "cache entry expired");
            cache.counters.miss();
            evict::remove_counted_impl(cache, &path, key).await;
            return None;
        }
        Freshness::VersionMismatch => {
            debug!(
                key,
                cached = %entry.producer_version,
                current = %cache.producer_version,
                "producer version changed, dropping cache entry"
            );
            cache.counters.miss();
            evict::remove_counted_impl(cache, &path, key).await;
            return None;
        }
    }

    match serde_json::from_value(entry.payload) {
        Ok(payload) => {
            debug!(key, "cache hit");
            cache.counters.hit();
            Some(payload)
        }
        Err(error) => {
            warn!(key, %error, "cached payload does not match the requested type");
            cache.counters.error();
            cache.counters.miss();
            None
        }
    }
}
