//! Common display helpers

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// `--` for absent optional values
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("--").to_string()
}
