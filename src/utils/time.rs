//! Duration and timestamp helpers.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::time::Duration;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Parses compound duration expressions like `10s`, `5m`, `2h`, `1d`,
/// `1h30m`, `500ms`. Returns `None` for anything that is not a sequence of
/// `<number><unit>` segments.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let s = text.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    let bytes = s.as_bytes();
    let mut total_millis: u64 = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        let num_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if num_start == pos {
            return None;
        }
        let value: u64 = s[num_start..pos].parse().ok()?;

        let unit_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if unit_start == pos {
            return None;
        }

        let factor = match &s[unit_start..pos] {
            "ms" => 1,
            "s" | "sec" | "secs" => MILLIS_PER_SECOND,
            "m" | "min" | "mins" => MILLIS_PER_MINUTE,
            "h" | "hr" | "hrs" => MILLIS_PER_HOUR,
            "d" | "day" | "days" => MILLIS_PER_DAY,
            _ => return None,
        };

        total_millis = total_millis.checked_add(value.checked_mul(factor)?)?;
    }

    Some(Duration::from_millis(total_millis))
}

/// Human-oriented format: `1d 2h 3m 4s 5ms`. Zero renders as `0s`.
pub fn format_duration(duration: Duration) -> String {
    let mut millis = duration.as_millis() as u64;
    if millis == 0 {
        return "0s".to_string();
    }

    let days = millis / MILLIS_PER_DAY;
    millis %= MILLIS_PER_DAY;
    let hours = millis / MILLIS_PER_HOUR;
    millis %= MILLIS_PER_HOUR;
    let minutes = millis / MILLIS_PER_MINUTE;
    millis %= MILLIS_PER_MINUTE;
    let seconds = millis / MILLIS_PER_SECOND;
    millis %= MILLIS_PER_SECOND;

    let mut parts: Vec<String> = Vec::with_capacity(5);
    if days != 0 {
        parts.push(format!("{days}d"));
    }
    if hours != 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes != 0 {
        parts.push(format!("{minutes}m"));
    }
    if seconds != 0 {
        parts.push(format!("{seconds}s"));
    }
    if millis != 0 || parts.is_empty() {
        parts.push(format!("{millis}ms"));
    }
    parts.join(" ")
}

/// Coarser format: only the largest unit, seconds rounded to the nearest.
pub fn format_duration_approx(duration: Duration) -> String {
    let millis = duration.as_millis() as u64;
    if millis == 0 {
        return "0s".to_string();
    }

    let days = millis / MILLIS_PER_DAY;
    if days > 0 {
        return format!("{days}d");
    }
    let hours = millis / MILLIS_PER_HOUR;
    if hours > 0 {
        return format!("{hours}h");
    }
    let minutes = millis / MILLIS_PER_MINUTE;
    if minutes > 0 {
        return format!("{minutes}m");
    }
    let seconds = (millis + MILLIS_PER_SECOND / 2) / MILLIS_PER_SECOND;
    if seconds > 0 {
        return format!("{seconds}s");
    }
    format!("{millis}ms")
}

/// Clamps a duration into [min, max] inclusive.
pub fn clamp_duration(d: Duration, min: Duration, max: Duration) -> Duration {
    d.clamp(min, max)
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_epoch_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// Converts epoch millis to a UTC timestamp. Out-of-range values fall back
/// to the epoch itself.
pub fn from_epoch_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Formats as RFC 3339 / ISO-8601 UTC, like `2025-11-14T12:34:56Z`.
pub fn format_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses an RFC 3339 / ISO-8601 timestamp (any offset) into UTC.
pub fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Drops the sub-second part of a timestamp.
pub fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    from_epoch_millis(instant.timestamp() * 1_000)
}

/// Drops seconds and sub-seconds of a timestamp.
pub fn truncate_to_minutes(instant: DateTime<Utc>) -> DateTime<Utc> {
    from_epoch_millis(instant.timestamp() / 60 * 60 * 1_000)
}

/// Time elapsed since `past` (negative if `past` is in the future).
pub fn since(past: DateTime<Utc>) -> chrono::Duration {
    Utc::now() - past
}

/// Time remaining until `future` (negative if already passed).
pub fn until(future: DateTime<Utc>) -> chrono::Duration {
    future - Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_simple() {
        assert_eq!(parse_duration("10s"), Some(Duration::from_secs(10)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7_200)));
        assert_eq!(parse_duration("1d"), Some(Duration::from_secs(86_400)));
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_parse_duration_compound() {
        assert_eq!(parse_duration("1h30m"), Some(Duration::from_secs(5_400)));
        assert_eq!(parse_duration("1d2h3m4s"), Some(Duration::from_secs(93_784)));
    }

    #[test]
    fn test_parse_duration_aliases_and_case() {
        assert_eq!(parse_duration("3MIN"), Some(Duration::from_secs(180)));
        assert_eq!(parse_duration(" 2hrs "), Some(Duration::from_secs(7_200)));
        assert_eq!(parse_duration("4days"), Some(Duration::from_secs(345_600)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("90"), None);
        assert_eq!(parse_duration("s"), None);
        assert_eq!(parse_duration("10x"), None);
        assert_eq!(parse_duration("10s extra"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(5_400)), "1h 30m");
        assert_eq!(
            format_duration(Duration::from_millis(90_061_005)),
            "1d 1h 1m 1s 5ms"
        );
    }

    #[test]
    fn test_format_duration_approx() {
        assert_eq!(format_duration_approx(Duration::from_secs(5_400)), "1h");
        assert_eq!(format_duration_approx(Duration::from_millis(1_600)), "2s");
        assert_eq!(format_duration_approx(Duration::from_millis(400)), "400ms");
        assert_eq!(format_duration_approx(Duration::ZERO), "0s");
    }

    #[test]
    fn test_clamp_duration() {
        let min = Duration::from_secs(1);
        let max = Duration::from_secs(10);
        assert_eq!(clamp_duration(Duration::from_secs(5), min, max), Duration::from_secs(5));
        assert_eq!(clamp_duration(Duration::ZERO, min, max), min);
        assert_eq!(clamp_duration(Duration::from_secs(60), min, max), max);
    }

    #[test]
    fn test_iso_round_trip() {
        let parsed = parse_iso("2025-11-14T12:34:56Z").unwrap();
        assert_eq!(format_iso(parsed), "2025-11-14T12:34:56Z");
        assert_eq!(to_epoch_millis(parsed), 1_763_123_696_000);
        assert!(parse_iso("not a timestamp").is_none());
    }

    #[test]
    fn test_truncation() {
        let t = parse_iso("2025-11-14T12:34:56.789Z").unwrap();
        assert_eq!(format_iso(truncate_to_seconds(t)), "2025-11-14T12:34:56Z");
        assert_eq!(format_iso(truncate_to_minutes(t)), "2025-11-14T12:34:00Z");
    }
}
