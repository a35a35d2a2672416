//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use regex::Regex;

use crate::period::local_midnight;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").expect("relative time regex is valid")
});

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Local date-time layouts accepted besides RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date-time argument relative to the current time.
///
/// Supports:
/// - `now`
/// - RFC 3339: "2009-12-01T09:00:00-05:00"
/// - Local time: "2009-12-01 09:00", "2009-12-01T09:00:30"
/// - Local date, meaning midnight: "2009-12-01"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Local>> {
    parse_datetime_at(s, Local::now())
}

/// [`parse_datetime`] with an explicit notion of "now".
pub fn parse_datetime_at(s: &str, now: DateTime<Local>) -> anyhow::Result<DateTime<Local>> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("now") {
        return Ok(now);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .with_context(|| format!("{s} does not exist in the local time zone"));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(local_midnight(date));
    }

    // Try relative time: "N hours/minutes/days/weeks ago"
    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date-time: {s}. Use e.g. '2009-12-01 09:00', 2009-12-01T09:00:00-05:00 or '2 hours ago'"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    Ok(now - TimeDelta::minutes(n * minutes_per_unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2009, 12, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_now() {
        assert_eq!(parse_datetime_at("now", now()).unwrap(), now());
    }

    #[test]
    fn parses_rfc3339() {
        let parsed = parse_datetime_at("2009-12-01T09:00:00Z", now()).unwrap();
        assert_eq!(parsed.timestamp(), 1_259_658_000);
    }

    #[test]
    fn parses_local_date_times() {
        let expected = Local.with_ymd_and_hms(2009, 12, 1, 9, 30, 0).unwrap();
        for input in [
            "2009-12-01 09:30",
            "2009-12-01 09:30:00",
            "2009-12-01T09:30",
            "2009-12-01T09:30:00",
        ] {
            assert_eq!(parse_datetime_at(input, now()).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn date_alone_means_midnight() {
        assert_eq!(
            parse_datetime_at("2009-12-01", now()).unwrap(),
            Local.with_ymd_and_hms(2009, 12, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_relative_times() {
        assert_eq!(
            parse_datetime_at("2 hours ago", now()).unwrap(),
            now() - TimeDelta::hours(2)
        );
        assert_eq!(
            parse_datetime_at("30 minutes ago", now()).unwrap(),
            now() - TimeDelta::minutes(30)
        );
        assert_eq!(
            parse_datetime_at("1 day ago", now()).unwrap(),
            now() - TimeDelta::days(1)
        );
        assert_eq!(
            parse_datetime_at("1 week ago", now()).unwrap(),
            now() - TimeDelta::weeks(1)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime_at("someday", now()).is_err());
        assert!(parse_datetime_at("2009-13-01", now()).is_err());
        assert!(parse_datetime_at("", now()).is_err());
    }

    #[test]
    fn rejects_huge_relative_values() {
        assert!(parse_datetime_at("99999999 weeks ago", now()).is_err());
    }
}
