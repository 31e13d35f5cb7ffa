//! Cache statistics display model

use serde::Serialize;
use tabled::Tabled;

use crate::cache::CacheStats;
use crate::output::formatters::{format_bytes, format_epoch_local};

/// `aerocast cache status` row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CacheStatsDisplay {
    #[tabled(rename = "ENTRIES")]
    pub total_entries: usize,

    #[tabled(rename = "FRESH")]
    pub valid_entries: usize,

    #[tabled(rename = "STALE")]
    pub expired_entries: usize,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "OLDEST")]
    pub oldest: String,

    #[tabled(rename = "NEWEST")]
    pub newest: String,
}

impl From<&CacheStats> for CacheStatsDisplay {
    fn from(stats: &CacheStats) -> Self {
        let when = |ts: Option<i64>| ts.map(format_epoch_local).unwrap_or_else(|| "--".to_string());
        Self {
            total_entries: stats.total_entries,
            valid_entries: stats.valid_entries,
            expired_entries: stats.expired_entries,
            size: format_bytes(stats.total_size_bytes),
            oldest: when(stats.oldest_entry),
            newest: when(stats.newest_entry),
        }
    }
}
