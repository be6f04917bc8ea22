use chrono::{DateTime, SecondsFormat, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as RFC 3339 in UTC, e.g. `2025-01-01T09:00:00.000Z`.
///
/// Out-of-range values are clamped to the Unix epoch.
pub fn timestamp_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time formatted as RFC 3339.
pub fn now_rfc3339() -> String {
    timestamp_to_rfc3339(now_millis())
}
