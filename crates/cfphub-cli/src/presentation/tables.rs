//! Table formatting utilities for CLI output.

use chrono::{DateTime, Utc};

/// Truncates a string to a maximum number of characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use cfphub_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Devoxx", 10), "Devoxx");
/// assert_eq!(truncate_string("Devoxx Belgium", 9), "Devoxx...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// `YYYY-MM-DD`, or `--` for an unknown date.
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "--".to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_string("Jfokus Stockholm", 9), "Jfokus...");
        assert_eq!(truncate_string("Développeurs", 8), "Dével...");
    }

    #[test]
    fn test_format_date() {
        let dt: DateTime<Utc> = "2025-10-06T07:00:00Z".parse().unwrap();
        assert_eq!(format_date(Some(dt)), "2025-10-06");
        assert_eq!(format_date(None), "--");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(&"Devoxx UK".to_string()), "--"), "Devoxx UK");
        assert_eq!(format_optional::<String>(None, "--"), "--");
    }
}
