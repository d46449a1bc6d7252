//! Producer version resolution.

use std::path::Path;
use std::time::UNIX_EPOCH;

use tokio::fs;
use tracing::{debug, warn};

use crate::config::CacheConfig;

/// Version used when neither an explicit version nor a readable producer
/// file is available.
pub const DEFAULT_PRODUCER_VERSION: &str = "1.0.0";

/// Resolve the producer version: explicit version, then the producer file's
/// modification time, then [`DEFAULT_PRODUCER_VERSION`].
pub async fn resolve_producer_version(config: &CacheConfig) -> String {
    if let Some(v) = &config.producer_version {
        return v.clone();
    }
    if let Some(path) = &config.producer_path {
        match version_from_mtime(path).await {
            Some(v) => {
                debug!(path = %path.display(), version = %v, "derived producer version");
                return v;
            }
            None => {
                warn!(
                    path = %path.display(),
                    "cannot stat producer file, using default producer version"
                );
            }
        }
    }
    DEFAULT_PRODUCER_VERSION.to_string()
}

/// `mtime-<millis>` of the file, if it can be determined.
pub async fn version_from_mtime(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).await.ok()?.modified().ok()?;
    let ms = modified.duration_since(UNIX_EPOCH).ok()?.as_millis();
    Some(format!("mtime-{ms}"))
}
