use chrono::{DateTime, Local, NaiveDateTime};

/// Timestamp layout used in history headers
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator placed between library fragments
pub const FRAGMENT_SEPARATOR: &str = ", ";

pub fn format_datetime(dt: &DateTime<Local>) -> String {
    dt.format(FORMAT).to_string()
}

/// Current local time in history-header form
pub fn now_timestamp() -> String {
    format_datetime(&Local::now())
}

/// Parse a history-header timestamp, `None` when it does not follow `FORMAT`
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), FORMAT).ok()
}

/// Build the `=== <timestamp> ===` header line (without newline)
pub fn history_header(timestamp: &str) -> String {
    format!("=== {} ===", timestamp)
}

/// Truncate a string for single-line previews, counting chars not bytes
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let flat: String = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_len {
        flat
    } else {
        let cut: String = flat.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
