//! `attest clean` - Remove expired and corrupted entries.

use anyhow::Result;

use super::super::args::{CacheArgs, OutputArgs, OutputFormat};
use super::{format, open_cache};
use crate::exit_codes::SUCCESS;

pub async fn cmd_clean(cache_args: &CacheArgs, out: OutputArgs) -> Result<i32> {
    let cache = open_cache(cache_args).await?;
    let report = cache.clear_expired().await;
    let stats = cache.statistics().await;

    match out.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "cleaned": report,
                "statistics": stats,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!(
                "Removed {} entr{} ({} freed)",
                report.deleted_count,
                if report.deleted_count == 1 { "y" } else { "ies" },
                format::format_size(report.bytes_freed)
            );
            println!();
            format::print_statistics(&stats, OutputFormat::Text)?;
        }
    }

    Ok(SUCCESS)
}
