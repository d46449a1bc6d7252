//! Human-readable rendering shared by the cache commands.

use anyhow::Result;
use attest_cache::CacheStatistics;
use chrono::{DateTime, SecondsFormat, Utc};

use super::super::args::OutputFormat;

pub(crate) fn print_statistics(stats: &CacheStatistics, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        OutputFormat::Text => {
            let s = &stats.session;
            println!("Cache directory:  {}", stats.storage_dir.display());
            println!("Producer version: {}", stats.producer_version);
            println!("TTL:              {}", format_duration_ms(stats.ttl_ms));
            println!(
                "Entries:          {} ({} valid, {} expired, {} corrupt)",
                stats.total_entries,
                stats.valid_entries,
                stats.expired_entries,
                stats.corrupt_entries
            );
            println!("Size:             {}", format_size(stats.total_size_bytes));
            println!(
                "Hit rate:         {:.1}% ({} hits, {} misses)",
                stats.hit_rate * 100.0,
                s.hits,
                s.misses
            );
            println!(
                "Session:          {} sets, {} deletes, {} errors",
                s.sets, s.deletes, s.errors
            );
        }
    }
    Ok(())
}

pub(crate) fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

pub(crate) fn format_duration_ms(ms: u64) -> String {
    const SEC: u64 = 1000;
    const MIN: u64 = 60 * SEC;
    const HOUR: u64 = 60 * MIN;
    const DAY: u64 = 24 * HOUR;

    if ms >= DAY && ms.is_multiple_of(DAY) {
        format!("{}d", ms / DAY)
    } else if ms >= HOUR && ms.is_multiple_of(HOUR) {
        format!("{}h", ms / HOUR)
    } else if ms >= MIN && ms.is_multiple_of(MIN) {
        format!("{}m", ms / MIN)
    } else if ms >= SEC && ms.is_multiple_of(SEC) {
        format!("{}s", ms / SEC)
    } else {
        format!("{}ms", ms)
    }
}

pub(crate) fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}
