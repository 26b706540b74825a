//! Format - Formatting Utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC datetime as RFC 3339 (round-trips through text conversion)
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Truncate a string to `max_len` characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// Truncate and left-align a cell to exactly `width` characters
pub fn pad_cell(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width), width = width)
}
