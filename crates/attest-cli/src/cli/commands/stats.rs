//! `attest stats` - Show cache statistics.

use anyhow::Result;

use super::super::args::{CacheArgs, OutputArgs};
use super::{format, open_cache};
use crate::exit_codes::SUCCESS;

pub async fn cmd_stats(cache_args: &CacheArgs, out: OutputArgs) -> Result<i32> {
    let cache = open_cache(cache_args).await?;
    let stats = cache.statistics().await;
    format::print_statistics(&stats, out.format)?;
    Ok(SUCCESS)
}
