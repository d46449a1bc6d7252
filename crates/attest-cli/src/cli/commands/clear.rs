//! `attest clear` - Remove every cached entry.

use anyhow::Result;

use super::super::args::CacheArgs;
use super::open_cache;
use crate::exit_codes::SUCCESS;

pub async fn cmd_clear(cache_args: &CacheArgs) -> Result<i32> {
    let cache = open_cache(cache_args).await?;
    let report = cache.clear_all().await;
    println!(
        "Cleared {} entr{} from {}",
        report.deleted_count,
        if report.deleted_count == 1 { "y" } else { "ies" },
        cache.storage_dir().display()
    );

    let errors = cache.counters().errors;
    if errors > 0 {
        eprintln!("warning: {errors} removal(s) failed, see log for details");
    }
    Ok(SUCCESS)
}
