// ── Timestamp and duration formatting ──
//
// Backend timestamps are naive (no UTC designator) but mean UTC; the
// convention of appending the designator before display must be preserved
// for shown times to match backend intent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Naive datetime formats the backend has been observed to emit.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a backend timestamp string.
///
/// Offset-carrying strings are respected as-is; naive strings are
/// interpreted as UTC (the "+Z" convention from the dashboards). Customer
/// records sometimes carry bare dates, which read as midnight UTC.
pub fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Render a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Render an optional timestamp, using the dashboards' "N/A" placeholder.
pub fn format_timestamp_opt(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(|| "N/A".to_owned(), format_timestamp)
}

/// Render an alarm duration in seconds as `"1d 2h 3m 4s"`, skipping zero
/// units. `None` and negative durations render as `"N/A"`; zero renders as
/// an empty string, matching the dashboards.
pub fn format_duration(duration_secs: Option<i64>) -> String {
    let Some(secs) = duration_secs else {
        return "N/A".to_owned();
    };
    if secs < 0 {
        return "N/A".to_owned();
    }

    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;

    [
        (days, "d"),
        (hours, "h"),
        (minutes, "m"),
        (seconds, "s"),
    ]
    .iter()
    .filter(|(value, _)| *value > 0)
    .map(|(value, unit)| format!("{value}{unit}"))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_space_separated() {
        let ts = parse_backend_timestamp("2025-03-01 09:30:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T09:30:00+00:00");
    }

    #[test]
    fn parses_naive_iso_t() {
        let ts = parse_backend_timestamp("2025-03-01T09:30:00.250").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn respects_explicit_offset() {
        let ts = parse_backend_timestamp("2025-03-01T09:30:00+05:30").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T04:00:00+00:00");
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let ts = parse_backend_timestamp("2023-01-01").unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_backend_timestamp("yesterday"), None);
        assert_eq!(parse_backend_timestamp(""), None);
    }

    #[test]
    fn duration_one_of_each_unit() {
        // 1d 1h 1m 1s
        assert_eq!(format_duration(Some(90_061)), "1d 1h 1m 1s");
    }

    #[test]
    fn duration_skips_zero_units() {
        assert_eq!(format_duration(Some(3_601)), "1h 1s");
        assert_eq!(format_duration(Some(59)), "59s");
    }

    #[test]
    fn duration_missing_or_negative_is_na() {
        assert_eq!(format_duration(None), "N/A");
        assert_eq!(format_duration(Some(-5)), "N/A");
    }

    #[test]
    fn duration_zero_is_empty() {
        assert_eq!(format_duration(Some(0)), "");
    }
}
