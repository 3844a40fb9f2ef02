/// Calendar date utilities
///
/// Habit history is exchanged with clients as plain `YYYY-MM-DD` strings
/// with no timezone component. This module is the single place those
/// strings are parsed, formatted, and stepped through. Everything here is
/// pure: the reference "today" is always an explicit parameter of the
/// callers, never read from the clock inside a calculation.
///
/// # Example
///
/// ```
/// use cadence_shared::analytics::calendar::{add_days, parse_day, to_iso};
///
/// let day = parse_day("2024-01-31").unwrap();
/// assert_eq!(to_iso(add_days(day, 1)), "2024-02-01");
/// ```

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Date format used everywhere a day crosses the wire
pub const ISO_DAY_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` string into a calendar date
///
/// Returns `None` for anything that is not a well-formed ISO day, which is
/// how malformed history entries are skipped rather than failing a whole
/// calculation (history is untrusted external input).
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, ISO_DAY_FORMAT).ok()
}

/// Strips the time-of-day from an instant, leaving the calendar date
pub fn normalize_to_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Formats a date as `YYYY-MM-DD`
///
/// Formats from the date's own year/month/day fields. There is no UTC
/// conversion step that could shift the day across a timezone boundary.
pub fn to_iso(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Calendar arithmetic: `date + n` days, handling month/year rollover
///
/// Saturates at the representable date range rather than panicking;
/// histories live centuries away from those bounds.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    if n >= 0 {
        date.checked_add_days(Days::new(n as u64)).unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
            .unwrap_or(date)
    }
}

/// Whole-day difference `(b - a)`, signed
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Parses a raw history into a deduplicated, ordered set of days
///
/// Entries that do not parse as `YYYY-MM-DD` are dropped. All analytics
/// consume history through this function, so the malformed-entry policy
/// lives in exactly one place. The stored strings themselves are never
/// rewritten; this is only the analytics view of them.
pub fn parse_history(history: &[String]) -> BTreeSet<NaiveDate> {
    history.iter().filter_map(|s| parse_day(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_valid() {
        let day = parse_day("2024-01-07").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
    }

    #[test]
    fn test_parse_day_rejects_garbage() {
        assert!(parse_day("").is_none());
        assert!(parse_day("not-a-date").is_none());
        assert!(parse_day("2024-13-01").is_none());
        assert!(parse_day("2024-02-30").is_none());
    }

    #[test]
    fn test_to_iso_pads_fields() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(to_iso(day), "2024-03-05");
    }

    #[test]
    fn test_roundtrip() {
        for s in ["2024-01-01", "1999-12-31", "2024-02-29"] {
            assert_eq!(to_iso(parse_day(s).unwrap()), s);
        }
    }

    #[test]
    fn test_add_days_month_rollover() {
        let day = parse_day("2024-01-31").unwrap();
        assert_eq!(to_iso(add_days(day, 1)), "2024-02-01");
        assert_eq!(to_iso(add_days(day, -31)), "2023-12-31");
    }

    #[test]
    fn test_add_days_leap_year() {
        let day = parse_day("2024-02-28").unwrap();
        assert_eq!(to_iso(add_days(day, 1)), "2024-02-29");
    }

    #[test]
    fn test_days_between_sign() {
        let a = parse_day("2024-01-01").unwrap();
        let b = parse_day("2024-01-08").unwrap();
        assert_eq!(days_between(a, b), 7);
        assert_eq!(days_between(b, a), -7);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn test_days_between_across_year_boundary() {
        let a = parse_day("2023-12-30").unwrap();
        let b = parse_day("2024-01-02").unwrap();
        assert_eq!(days_between(a, b), 3);
    }

    #[test]
    fn test_normalize_to_day_strips_time() {
        let instant = DateTime::parse_from_rfc3339("2024-01-07T23:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(to_iso(normalize_to_day(instant)), "2024-01-07");
    }

    #[test]
    fn test_parse_history_dedupes_and_sorts() {
        let history = vec![
            "2024-01-03".to_string(),
            "2024-01-01".to_string(),
            "2024-01-03".to_string(),
            "bogus".to_string(),
            "2024-01-02".to_string(),
        ];
        let days: Vec<String> = parse_history(&history).into_iter().map(to_iso).collect();
        assert_eq!(days, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_parse_history_empty() {
        assert!(parse_history(&[]).is_empty());
    }
}
