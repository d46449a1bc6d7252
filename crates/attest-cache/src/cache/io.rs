//! Filesystem access for cache entries.
//!
//! Nothing here touches the session counters; callers decide how a failure
//! is accounted.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::entry::CacheEntry;
use crate::error::{CacheError, CacheResult};

use super::keys;

/// Result of loading one entry file.
pub(crate) enum Loaded {
    /// No file (never written, or removed concurrently).
    Missing,
    Entry { entry: CacheEntry, size: u64 },
    /// I/O failure other than not-found.
    Unreadable(CacheError),
    /// Bytes present but not a record for this key.
    Corrupt { error: CacheError, size: u64 },
}

pub(crate) async fn read_entry_impl(path: &Path, key: &str) -> Loaded {
    let bytes = match fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Loaded::Missing,
        Err(e) => return Loaded::Unreadable(CacheError::entry_read(key, e)),
    };
    let size = bytes.len() as u64;

    match serde_json::from_slice::<CacheEntry>(&bytes) {
        Ok(entry) if entry.key == key => Loaded::Entry { entry, size },
        Ok(entry) => Loaded::Corrupt {
            error: CacheError::entry_read(key, format!("record carries key {}", entry.key)),
            size,
        },
        Err(e) => Loaded::Corrupt {
            error: CacheError::entry_read(key, e),
            size,
        },
    }
}

/// Write `bytes` to a temp file next to the entry, then rename it into place.
/// Readers see either the previous record or the new one, never a partial file.
pub(crate) async fn write_atomic_impl(
    storage_dir: &Path,
    key: &str,
    bytes: &[u8],
) -> CacheResult<()> {
    let temp_path = keys::temp_path_impl(storage_dir, key);
    let path = keys::entry_path_impl(storage_dir, key);

    if let Err(e) = fs::write(&temp_path, bytes).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(CacheError::entry_write(key, format!("failed to write temp file: {e}")));
    }

    if let Err(e) = fs::rename(&temp_path, &path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(CacheError::entry_write(key, format!("failed to rename temp file: {e}")));
    }

    Ok(())
}

/// `Ok(true)` if removed, `Ok(false)` if already gone.
pub(crate) async fn remove_file_impl(path: &Path) -> std::io::Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Files found in the storage directory.
#[derive(Debug, Default)]
pub(crate) struct DirScan {
    /// `(key, path)`, sorted by key.
    pub entries: Vec<(String, PathBuf)>,
    pub temps: Vec<PathBuf>,
    /// Directories named like entries. Never removed by a sweep.
    pub foreign: Vec<PathBuf>,
}

/// List entry and temp files. A missing directory is an empty store.
pub(crate) async fn scan_dir_impl(storage_dir: &Path) -> std::io::Result<DirScan> {
    let mut scan = DirScan::default();

    let mut dir = match fs::read_dir(storage_dir).await {
        Ok(d) => d,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(scan),
        Err(e) => return Err(e),
    };

    while let Some(item) = dir.next_entry().await? {
        let file_name = item.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let is_dir = match item.file_type().await {
            Ok(t) => t.is_dir(),
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        };
        if let Some(key) = keys::key_from_file_name(name) {
            if is_dir {
                scan.foreign.push(item.path());
            } else {
                scan.entries.push((key.to_string(), item.path()));
            }
        } else if !is_dir && keys::is_temp_file_name(name) {
            scan.temps.push(item.path());
        }
    }

    scan.entries.sort_by(|a, b| a.0.cmp(&b.0));
    scan.foreign.sort();
    Ok(scan)
}
