//! `attest list` - List cached entries.

use anyhow::Result;

use super::super::args::{CacheArgs, OutputArgs, OutputFormat};
use super::{format, open_cache};
use crate::exit_codes::SUCCESS;

pub async fn cmd_list(cache_args: &CacheArgs, out: OutputArgs) -> Result<i32> {
    let cache = open_cache(cache_args).await?;
    let rows = cache.list().await;

    match out.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries": rows,
                "count": rows.len(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!(
                "{:<16} {:<32} {:>10} {:<20} STATUS",
                "KEY", "SOURCE", "SIZE", "CREATED"
            );
            println!("{:-<16} {:-<32} {:->10} {:-<20} {:-<7}", "", "", "", "", "");
            for row in &rows {
                println!(
                    "{:<16} {:<32} {:>10} {:<20} {}",
                    &row.key[..16.min(row.key.len())],
                    format::truncate(&row.source_label, 32),
                    format::format_size(row.size_bytes),
                    format::format_timestamp(row.created_at),
                    if row.expired { "expired" } else { "valid" }
                );
            }
            if rows.is_empty() {
                eprintln!("(no cached entries)");
            }
        }
    }

    Ok(SUCCESS)
}
