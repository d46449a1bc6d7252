//! Content-addressed cache for document validation results.
//!
//! AI-vision validation of rendered pages is slow and billed per call. This
//! crate memoizes validation results on disk, keyed by the content being
//! validated and the version of the validator that produced the result:
//!
//! - Keys: SHA-256 over the content bytes followed by the producer version
//! - Expiry: entries older than the TTL (default 7 days) are treated as absent
//! - Invalidation: entries from another producer version are treated as absent
//! - Best-effort: a broken entry or a failed write never fails the caller
//!
//! # Quick Start
//!
//! ```no_run
//! use attest_cache::{CacheConfig, ValidationCache};
//! use serde_json::{json, Value};
//!
//! # async fn example() -> Result<(), attest_cache::CacheError> {
//! let cache = ValidationCache::open(CacheConfig::from_env()).await?;
//!
//! let page = std::fs::read("page-1.png").unwrap_or_default();
//! let verdict: Value = match cache.get(&page).await {
//!     Some(v) => v,
//!     None => {
//!         let v = json!({"score": 92});
//!         cache.set(&page, &v).await;
//!         v
//!     }
//! };
//! # let _ = verdict;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `ATTEST_CACHE_DIR` | Storage directory (default: `./.cache/validations`) |
//! | `ATTEST_CACHE_TTL_MS` | Entry lifetime in milliseconds (default: 7 days) |
//! | `ATTEST_PRODUCER_VERSION` | Validator version used for invalidation |
//! | `ATTEST_PRODUCER_PATH` | Validator file whose mtime becomes the version |
//!
//! Expired entries are removed lazily on lookup. Call
//! [`ValidationCache::clear_expired`] periodically (or `attest clean`) to
//! bound disk usage.

pub mod cache;
pub mod clock;
pub mod config;
pub mod digest;
pub mod entry;
pub mod error;
pub mod stats;
pub mod version;

// Re-export main types
pub use cache::ValidationCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, DEFAULT_STORAGE_SUBDIR, DEFAULT_TTL_MS};
pub use digest::derive_key;
pub use entry::{CacheEntry, EntrySummary, Freshness};
pub use error::{CacheError, CacheResult};
pub use stats::{CacheStatistics, ClearReport, CounterSnapshot, SweepReport};
pub use version::DEFAULT_PRODUCER_VERSION;
