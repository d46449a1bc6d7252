//! Cache configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, CacheResult};

/// Default TTL (7 days).
pub const DEFAULT_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Project-relative default storage location.
pub const DEFAULT_STORAGE_SUBDIR: &str = ".cache/validations";

/// Validation cache configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Where entries persist. `None` resolves to [`default_storage_dir`].
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Expiration window in milliseconds. `None` means [`DEFAULT_TTL_MS`].
    #[serde(default)]
    pub ttl_ms: Option<u64>,

    /// Explicit producer version; wins over `producer_path`.
    #[serde(default)]
    pub producer_version: Option<String>,

    /// File implementing the producing logic. Its modification time becomes
    /// the producer version when no explicit version is set.
    #[serde(default)]
    pub producer_path: Option<PathBuf>,
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `ATTEST_CACHE_DIR` | Storage directory |
    /// | `ATTEST_CACHE_TTL_MS` | TTL in milliseconds |
    /// | `ATTEST_PRODUCER_VERSION` | Explicit producer version |
    /// | `ATTEST_PRODUCER_PATH` | Producer file for mtime-derived versions |
    pub fn from_env() -> Self {
        Self {
            storage_dir: non_empty_var("ATTEST_CACHE_DIR").map(PathBuf::from),
            ttl_ms: non_empty_var("ATTEST_CACHE_TTL_MS").and_then(|v| v.parse().ok()),
            producer_version: non_empty_var("ATTEST_PRODUCER_VERSION"),
            producer_path: non_empty_var("ATTEST_PRODUCER_PATH").map(PathBuf::from),
        }
    }

    /// Set the storage directory.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Set the expiration window.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_ms = Some(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Set an explicit producer version.
    pub fn with_producer_version(mut self, version: impl Into<String>) -> Self {
        self.producer_version = Some(version.into());
        self
    }

    /// Derive the producer version from this file's modification time.
    pub fn with_producer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.producer_path = Some(path.into());
        self
    }

    /// Effective TTL.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms.unwrap_or(DEFAULT_TTL_MS))
    }

    /// Effective storage directory.
    pub fn resolved_storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(default_storage_dir)
    }

    pub(crate) fn validate(&self) -> CacheResult<()> {
        if self.ttl().is_zero() {
            return Err(CacheError::Config {
                message: "ttl must be greater than zero".to_string(),
            });
        }
        if let Some(v) = &self.producer_version {
            if v.trim().is_empty() {
                return Err(CacheError::Config {
                    message: "producer version must not be blank".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Default storage location: `<cwd>/.cache/validations`, or the OS cache dir
/// when the working directory is unavailable.
pub fn default_storage_dir() -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(DEFAULT_STORAGE_SUBDIR),
        Err(_) => dirs::cache_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join("attest")
            .join("validations"),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "ATTEST_CACHE_DIR",
        "ATTEST_CACHE_TTL_MS",
        "ATTEST_PRODUCER_VERSION",
        "ATTEST_PRODUCER_PATH",
    ];

    fn clear_vars() {
        for v in VARS {
            std::env::remove_var(v);
        }
    }

    #[test]
    fn defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl(), Duration::from_secs(7 * 24 * 60 * 60));
        assert!(config
            .resolved_storage_dir()
            .ends_with(DEFAULT_STORAGE_SUBDIR));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders_override_defaults() {
        let config = CacheConfig::new()
            .with_storage_dir("/tmp/attest-test")
            .with_ttl(Duration::from_millis(1000))
            .with_producer_version("v2")
            .with_producer_path("validator.rs");

        assert_eq!(config.resolved_storage_dir(), PathBuf::from("/tmp/attest-test"));
        assert_eq!(config.ttl_ms, Some(1000));
        assert_eq!(config.producer_version.as_deref(), Some("v2"));
        assert_eq!(config.producer_path, Some(PathBuf::from("validator.rs")));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let err = CacheConfig::new()
            .with_ttl(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CacheError::Config { .. }));
    }

    #[test]
    fn blank_producer_version_is_rejected() {
        let err = CacheConfig::new()
            .with_producer_version("  ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, CacheError::Config { .. }));
    }

    #[test]
    #[serial]
    fn from_env_reads_all_variables() {
        clear_vars();
        std::env::set_var("ATTEST_CACHE_DIR", "/var/cache/attest");
        std::env::set_var("ATTEST_CACHE_TTL_MS", "60000");
        std::env::set_var("ATTEST_PRODUCER_VERSION", "validator-3");
        std::env::set_var("ATTEST_PRODUCER_PATH", "/opt/validator.js");

        let config = CacheConfig::from_env();
        clear_vars();

        assert_eq!(config.storage_dir, Some(PathBuf::from("/var/cache/attest")));
        assert_eq!(config.ttl(), Duration::from_secs(60));
        assert_eq!(config.producer_version.as_deref(), Some("validator-3"));
        assert_eq!(config.producer_path, Some(PathBuf::from("/opt/validator.js")));
    }

    #[test]
    #[serial]
    fn from_env_ignores_blank_and_unparseable_values() {
        clear_vars();
        std::env::set_var("ATTEST_CACHE_DIR", "   ");
        std::env::set_var("ATTEST_CACHE_TTL_MS", "a week");

        let config = CacheConfig::from_env();
        clear_vars();

        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn config_deserializes_with_missing_fields() {
        let config: CacheConfig = serde_json::from_str(r#"{"ttl_ms": 5}"#).unwrap();
        assert_eq!(config.ttl(), Duration::from_millis(5));
        assert!(config.storage_dir.is_none());
    }
}
