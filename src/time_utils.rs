use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Drop minutes, seconds and sub-second precision in the timestamp's own offset.
///
/// Truncating in the local offset (not UTC) keeps the last label equal to the
/// viewer's current hour even for half-hour zones.
pub fn truncate_to_hour(timestamp: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    timestamp
        .with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_minute(0))
        .unwrap_or(timestamp)
}

/// Server-side bucket key: `YYYY-MM-DDTHH:00` in UTC.
pub fn format_hour_key(hour: &DateTime<FixedOffset>) -> String {
    hour.with_timezone(&Utc).format("%Y-%m-%dT%H:00").to_string()
}

/// Axis label: `HH:00` in the viewer's offset.
pub fn format_hour_label(hour: &DateTime<FixedOffset>) -> String {
    format!("{:02}:00", hour.hour())
}

/// Browser offset from `Date.getTimezoneOffset()` (minutes *behind* UTC).
pub fn offset_from_js_minutes(minutes_behind_utc: f64) -> Option<FixedOffset> {
    if !minutes_behind_utc.is_finite() {
        return None;
    }
    FixedOffset::west_opt((minutes_behind_utc * 60.0).round() as i32)
}
