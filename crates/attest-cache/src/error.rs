//! Error types for the validation cache.

use std::path::PathBuf;

/// Cache errors.
///
/// Only `KeyDerivation`, `StorageInit` and `Config` ever reach callers of the
/// public API. Entry-level read/write failures are absorbed by the cache,
/// logged and counted in the session `errors` counter.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Input content could not be read, so no key can be formed.
    #[error("cannot derive cache key from {}: {source}", path.display())]
    KeyDerivation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage location cannot be created or accessed.
    #[error("cannot initialize cache storage at {}: {source}", path.display())]
    StorageInit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A single entry could not be read or parsed.
    #[error("failed to read cache entry {key}: {message}")]
    EntryRead { key: String, message: String },

    /// A single entry could not be persisted.
    #[error("failed to write cache entry {key}: {message}")]
    EntryWrite { key: String, message: String },
}

impl CacheError {
    pub(crate) fn entry_read(key: &str, message: impl std::fmt::Display) -> Self {
        Self::EntryRead {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn entry_write(key: &str, message: impl std::fmt::Display) -> Self {
        Self::EntryWrite {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether the error makes the cache unusable as a whole.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StorageInit { .. } | Self::Config { .. })
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
