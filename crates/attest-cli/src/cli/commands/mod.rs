pub mod clean;
pub mod clear;
pub mod dispatch;
pub mod list;
pub mod stats;
mod format;

pub use dispatch::dispatch;

use anyhow::{Context, Result};
use attest_cache::{CacheConfig, ValidationCache};

use super::args::CacheArgs;

/// Open the cache from the environment, with `--dir` taking precedence.
pub(crate) async fn open_cache(args: &CacheArgs) -> Result<ValidationCache> {
    let mut config = CacheConfig::from_env();
    if let Some(dir) = &args.dir {
        config = config.with_storage_dir(dir);
    }
    let dir = config.resolved_storage_dir();
    tracing::debug!(dir = %dir.display(), "opening validation cache");
    ValidationCache::open(config)
        .await
        .with_context(|| format!("failed to open cache at {}", dir.display()))
}
