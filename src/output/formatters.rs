//! Reusable formatting utilities for CLI output

use chrono::{DateTime, Local, Utc};

/// Local date/time with the UTC offset, e.g. `03/15/2025 14:30 +01:00`
pub fn format_datetime_local(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local)
        .format("%m/%d/%Y %H:%M %:z")
        .to_string()
}

/// Epoch seconds as a local date/time, `N/A` when out of range
pub fn format_epoch_local(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => format_datetime_local(dt),
        None => "N/A".to_string(),
    }
}

/// Time until (or since) `target`, e.g. `in 23h 59m` or `2h 5m ago`
pub fn format_relative(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = target.signed_duration_since(now);
    let secs = delta.num_seconds();
    let span = format_span(secs.unsigned_abs());

    if secs >= 0 {
        format!("in {}", span)
    } else {
        format!("{} ago", span)
    }
}

/// Compact duration: `1h 1m`, `2m 5s`, `45s`
pub fn format_span(secs: u64) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Human-readable byte count
pub fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{} B", bytes)
    } else if bytes_f < KB * KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{:.1} MB", bytes_f / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_epoch_local() {
        // Jan 15, 2025 12:00:00 UTC; any local offset stays on the same date
        let result = format_epoch_local(1_736_942_400);
        assert!(result.contains("01/15/2025"));
        assert_eq!(format_epoch_local(i64::MAX), "N/A");
    }

    #[test]
    fn test_format_relative() {
        let now = Utc::now();
        assert_eq!(
            format_relative(now + Duration::hours(23) + Duration::minutes(59), now),
            "in 23h 59m"
        );
        assert_eq!(
            format_relative(now - Duration::seconds(125), now),
            "2m 5s ago"
        );
    }

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(3661), "1h 1m");
        assert_eq!(format_span(60), "1m 0s");
        assert_eq!(format_span(45), "45s");
        assert_eq!(format_span(0), "0s");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
