//! Cache management commands

use std::path::PathBuf;

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::models::CacheStatsDisplay;
use crate::output::{self, json::format_json};

/// Cache directory from the config, else the platform default
fn cache_dir(opts: &GlobalOptions) -> Result<PathBuf> {
    let config = Config::load_at(opts.config_ref())?;
    match config.cache.dir {
        Some(dir) => Ok(dir),
        None => Ok(CacheStorage::cache_dir()?),
    }
}

/// Show cache statistics
pub fn status(opts: &GlobalOptions) -> Result<()> {
    let dir = cache_dir(opts)?;
    let stats = CacheStorage::open_at(&dir)?.stats()?;
    let display = CacheStatsDisplay::from(&stats);

    match opts.format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "path": dir.display().to_string(),
                "total_entries": stats.total_entries,
                "valid_entries": stats.valid_entries,
                "expired_entries": stats.expired_entries,
                "total_size_bytes": stats.total_size_bytes,
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
            });
            println!("{}", format_json(&body)?);
        }
        OutputFormat::Table => output::print_rows(&[display], opts.format)?,
        OutputFormat::Pretty => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", dir.display());
            println!("Fresh entries:  {}", display.valid_entries);
            println!("Stale:          {}", display.expired_entries);
            println!("Total size:     {}", display.size);
            println!("Oldest entry:   {}", display.oldest);
            println!("Newest entry:   {}", display.newest);
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear(opts: &GlobalOptions) -> Result<()> {
    let stats = CacheStorage::open_at(&cache_dir(opts)?)?.clear_all()?;

    match opts.format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", format_json(&body)?);
        }
        _ if stats.entries_removed > 0 => {
            println!("Cleared {} cache entries", stats.entries_removed)
        }
        _ => println!("Cache was already empty"),
    }

    Ok(())
}

/// Show cache path
pub fn path(opts: &GlobalOptions) -> Result<()> {
    println!("{}", cache_dir(opts)?.display());
    Ok(())
}
