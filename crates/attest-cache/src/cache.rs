//! Content-addressed store for validation results.
//!
//! # Layout
//!
//! ```text
//! <storage_dir>/
//!   <key>.json               # one record per key
//!   .<key>.<uuid>.tmp        # in-flight atomic writes
//! ```
//!
//! `key` is the SHA-256 of the content bytes followed by the producer version.
//! A record is served only while it is younger than the TTL and was produced by
//! the current producer version; anything else is purged when looked up.
//! Expired entries that are never looked up stay on disk until
//! [`ValidationCache::clear_expired`] runs.
//!
//! # Concurrency
//!
//! No locking. Concurrent `set` calls for one key are last-write-wins; each
//! writer renames its own temp file into place, so a record is never torn.
//! Several processes may share a directory; an entry vanishing between listing
//! and reading is treated as a miss.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::clock::{duration_ms, Clock, SystemClock};
use crate::config::CacheConfig;
use crate::digest::{content_label, derive_key};
use crate::entry::EntrySummary;
use crate::error::{CacheError, CacheResult};
use crate::stats::{CacheStatistics, ClearReport, CounterSnapshot, SessionCounters, SweepReport};
use crate::version::resolve_producer_version;

mod evict;
mod inspect;
mod io;
mod keys;
mod put;
mod read;

/// Durable memoization of validation results.
///
/// Every operation except construction and file-based key derivation is
/// total: I/O and parse failures on single entries degrade to a miss or a
/// no-op and are counted in [`CounterSnapshot::errors`].
#[derive(Debug, Clone)]
pub struct ValidationCache {
    storage_dir: PathBuf,
    ttl: Duration,
    producer_version: String,
    clock: Arc<dyn Clock>,
    counters: Arc<SessionCounters>,
}

impl ValidationCache {
    /// Open (and create if needed) the cache described by `config`.
    pub async fn open(config: CacheConfig) -> CacheResult<Self> {
        Self::open_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Open with configuration from the environment.
    pub async fn from_env() -> CacheResult<Self> {
        Self::open(CacheConfig::from_env()).await
    }

    /// Open with an explicit time source.
    pub async fn open_with_clock(
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> CacheResult<Self> {
        config.validate()?;

        let storage_dir = config.resolved_storage_dir();
        fs::create_dir_all(&storage_dir)
            .await
            .map_err(|source| CacheError::StorageInit {
                path: storage_dir.clone(),
                source,
            })?;

        let producer_version = resolve_producer_version(&config).await;
        info!(
            dir = %storage_dir.display(),
            producer_version = %producer_version,
            ttl_ms = config.ttl().as_millis() as u64,
            "opened validation cache"
        );

        Ok(Self {
            storage_dir,
            ttl: config.ttl(),
            producer_version,
            clock,
            counters: Arc::new(SessionCounters::default()),
        })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn producer_version(&self) -> &str {
        &self.producer_version
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current session counters.
    pub fn counters(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    /// Key for `content` under the current producer version.
    pub fn derive_key(&self, content: &[u8]) -> String {
        derive_key(content, &self.producer_version)
    }

    /// Key for the contents of the file at `path`.
    pub async fn derive_key_for_file(&self, path: impl AsRef<Path>) -> CacheResult<String> {
        let content = read_content(path.as_ref()).await?;
        Ok(self.derive_key(&content))
    }

    /// Look up the result cached for `content`.
    ///
    /// Expired or version-skewed entries are deleted and reported as a miss.
    pub async fn get<T: DeserializeOwned>(&self, content: &[u8]) -> Option<T> {
        let key = self.derive_key(content);
        read::get_by_key_impl(self, &key).await
    }

    /// Store `payload` for `content`, replacing any previous entry.
    ///
    /// Failures are logged and counted; the caller's workflow is never failed.
    pub async fn set<T: Serialize + ?Sized>(&self, content: &[u8], payload: &T) {
        self.set_labeled(content, &content_label(content), payload).await;
    }

    /// [`set`](Self::set) with an explicit source label.
    pub async fn set_labeled<T: Serialize + ?Sized>(
        &self,
        content: &[u8],
        source_label: &str,
        payload: &T,
    ) {
        let key = self.derive_key(content);
        put::put_by_key_impl(self, &key, source_label, payload).await;
    }

    /// Look up the result cached for the file at `path`.
    ///
    /// Fails only if the file cannot be read.
    pub async fn get_file<T: DeserializeOwned>(
        &self,
        path: impl AsRef<Path>,
    ) -> CacheResult<Option<T>> {
        let key = self.derive_key_for_file(path).await?;
        Ok(read::get_by_key_impl(self, &key).await)
    }

    /// Store `payload` for the file at `path`, labelled with its file name.
    ///
    /// Fails only if the file cannot be read.
    pub async fn set_file<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        payload: &T,
    ) -> CacheResult<()> {
        let path = path.as_ref();
        let content = read_content(path).await?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.set_labeled(&content, &label, payload).await;
        Ok(())
    }

    /// Return the cached result for `content`, or run `producer`, cache its
    /// `Ok` value and return it. Producer errors pass through uncached.
    pub async fn get_or_compute<T, E, F, Fut>(&self, content: &[u8], producer: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get(content).await {
            return Ok(cached);
        }
        let value = producer().await?;
        self.set(content, &value).await;
        Ok(value)
    }

    /// Delete the entry for `content`. Returns whether an entry was removed.
    pub async fn invalidate(&self, content: &[u8]) -> bool {
        let key = self.derive_key(content);
        let path = self.entry_path(&key);
        evict::remove_counted_impl(self, &path, &key).await
    }

    /// Delete expired, unreadable and corrupted entries.
    pub async fn clear_expired(&self) -> SweepReport {
        evict::clear_expired_impl(self).await
    }

    /// Delete every entry.
    pub async fn clear_all(&self) -> ClearReport {
        evict::clear_all_impl(self).await
    }

    /// Store composition and session counters.
    ///
    /// Entries are classified on TTL only; producer version is not checked.
    pub async fn statistics(&self) -> CacheStatistics {
        inspect::statistics_impl(self).await
    }

    /// Readable entries, newest first.
    pub async fn list(&self) -> Vec<EntrySummary> {
        inspect::list_impl(self).await
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        keys::entry_path_impl(&self.storage_dir, key)
    }

    fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    fn ttl_ms(&self) -> i64 {
        duration_ms(self.ttl)
    }
}

async fn read_content(path: &Path) -> CacheResult<Vec<u8>> {
    fs::read(path)
        .await
        .map_err(|source| CacheError::KeyDerivation {
            path: path.to_path_buf(),
            source,
        })
}
