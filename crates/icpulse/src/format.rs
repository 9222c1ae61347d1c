//! Shared formatting helpers
//!
//! One implementation for every handler. All functions are pure
//! `number -> string` transforms.

use chrono::{TimeZone, Utc};

/// Abbreviate a large number with a K/M/B/T suffix and two decimals.
///
/// `1_500_000 -> "1.50M"`, `2_300_000_000 -> "2.30B"`. Values below one
/// thousand are printed with two decimals and no suffix.
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.2}")
    }
}

/// Abbreviate a byte count. Zero (or negative) renders as "N/A" since the
/// upstream metrics APIs report zero when a gauge is missing.
pub fn format_bytes(bytes: f64) -> String {
    if bytes <= 0.0 {
        return "N/A".to_string();
    }
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Cycle counts use the same thresholds as [`format_value`] but always carry
/// an explicit "cycles" reading in T/B/M.
pub fn format_cycles(cycles: f64) -> String {
    format_value(cycles)
}

/// Percentage with one decimal, e.g. `42.3%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Yes/no vote tally rendered as absolute counts plus percentages of the
/// total voting power.
pub fn format_vote_tally(yes: f64, no: f64, total: f64) -> String {
    if total <= 0.0 {
        return "No votes cast yet".to_string();
    }
    format!(
        "Yes {} ({}) / No {} ({})",
        format_value(yes),
        format_percent(yes / total),
        format_value(no),
        format_percent(no / total),
    )
}

/// Seconds since epoch to `YYYY-MM-DD HH:MM UTC`.
pub fn format_timestamp(secs: i64) -> String {
    match Utc.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "unknown".to_string(),
    }
}

/// ICP amount from e8s (1 ICP = 1e8 e8s).
pub fn format_e8s(e8s: u64) -> String {
    format_value(e8s as f64 / 1e8)
}

/// A duration in seconds rendered as years/days for dissolve delays.
pub fn format_duration_days(secs: u64) -> String {
    const DAY: u64 = 86_400;
    const YEAR: u64 = 365 * DAY;
    if secs >= YEAR {
        let years = secs as f64 / YEAR as f64;
        format!("{years:.1} years")
    } else {
        format!("{} days", secs / DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_abbreviation_thresholds() {
        assert_eq!(format_value(1_500_000.0), "1.50M");
        assert_eq!(format_value(2_300_000_000.0), "2.30B");
        assert_eq!(format_value(4_000_000_000_000.0), "4.00T");
        assert_eq!(format_value(1_500.0), "1.50K");
        assert_eq!(format_value(999.0), "999.00");
    }

    #[test]
    fn bytes_abbreviation() {
        assert_eq!(format_bytes(1024.0), "1.0 KB");
        assert_eq!(format_bytes(0.0), "N/A");
        assert_eq!(format_bytes(512.0), "512.0 B");
        assert_eq!(format_bytes(1024.0 * 1024.0 * 1.5), "1.5 MB");
    }

    #[test]
    fn percent_and_tally() {
        assert_eq!(format_percent(0.423), "42.3%");
        let tally = format_vote_tally(3_000_000.0, 1_000_000.0, 4_000_000.0);
        assert!(tally.contains("3.00M"));
        assert!(tally.contains("75.0%"));
        assert!(tally.contains("25.0%"));
        assert_eq!(format_vote_tally(0.0, 0.0, 0.0), "No votes cast yet");
    }

    #[test]
    fn timestamp_is_utc() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00 UTC");
    }

    #[test]
    fn e8s_conversion() {
        assert_eq!(format_e8s(250_000_000), "2.50");
        assert_eq!(format_e8s(150_000_000_000_000), "1.50M");
    }

    #[test]
    fn dissolve_delay_rendering() {
        assert_eq!(format_duration_days(5 * 365 * 86_400), "5.0 years");
        assert_eq!(format_duration_days(30 * 86_400), "30 days");
    }
}
