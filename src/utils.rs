//! Utility helpers shared across the console.

use chrono::{DateTime, NaiveDateTime};
use unicode_segmentation::UnicodeSegmentation;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d, %H:%M";

/// Render a service timestamp as `YYYY-MM-DD, HH:MM`.
///
/// The wall-clock time is shown as sent (no timezone conversion). Values
/// chrono cannot parse are cut at the same character positions, and
/// anything shorter is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(TIMESTAMP_FORMAT).to_string();
    }

    let chars: Vec<char> = raw.chars().collect();
    if chars.len() < 16 {
        return raw.to_string();
    }
    let date: String = chars[..10].iter().collect();
    let time: String = chars[11..16].iter().collect();
    format!("{}, {}", date, time)
}

/// Like [`format_timestamp`] but with a dash for missing values.
pub fn format_optional_timestamp(raw: Option<&str>) -> String {
    match raw {
        Some(raw) if !raw.trim().is_empty() => format_timestamp(raw),
        _ => "-".to_string(),
    }
}

/// Cut `text` to at most `max` user-perceived characters, adding an
/// ellipsis when something was dropped.
pub fn truncate_graphemes(text: &str, max: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();
    if graphemes.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

/// Percentage text for a progress value already clamped to `0..=100`.
pub fn format_percent(progress: f64) -> String {
    format!("{}%", progress.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_keep_wall_clock() {
        assert_eq!(format_timestamp("2024-05-01T10:20:30Z"), "2024-05-01, 10:20");
        assert_eq!(format_timestamp("2024-05-01T23:59:00+05:00"), "2024-05-01, 23:59");
        assert_eq!(format_timestamp("2024-05-01T08:07:06.123456"), "2024-05-01, 08:07");
    }

    #[test]
    fn unparseable_timestamps_are_sliced() {
        assert_eq!(format_timestamp("2024-05-01 10:20:30 UTC"), "2024-05-01, 10:20");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_optional_timestamp(None), "-");
        assert_eq!(format_optional_timestamp(Some("  ")), "-");
    }

    #[test]
    fn truncation_respects_graphemes() {
        assert_eq!(truncate_graphemes("short", 10), "short");
        assert_eq!(truncate_graphemes("exactly", 7), "exactly");
        assert_eq!(truncate_graphemes("a longer text", 8), "a longer…");
        assert_eq!(truncate_graphemes("e\u{301}e\u{301}e\u{301}", 2), "e\u{301}e\u{301}…");
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(55.5), "56%");
        assert_eq!(format_percent(100.0), "100%");
    }
}
