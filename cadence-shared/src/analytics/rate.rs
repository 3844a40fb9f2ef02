/// Rolling completion rate over a trailing window
///
/// The rate is the percentage of expected intervals inside the window
/// `[today - window_days + 1, today]` that have a recorded completion.
/// Daily and monthly habits expect one key per calendar day; weekly habits
/// expect one key every seven days anchored at the window start.

use chrono::NaiveDate;

use super::calendar::{add_days, parse_history};
use super::streak::step_days;
use crate::models::habit::HabitFrequency;

/// Trailing window used when the caller does not specify one
pub const DEFAULT_WINDOW_DAYS: u32 = 90;

/// Largest window length callers should accept, ten years of daily
/// intervals. The loop below walks one step per expected interval, so
/// the window must be bounded before untrusted input reaches it.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Completion rate as an integer percentage in `[0, 100]`
///
/// A zero-length window has no expected intervals and yields 0 instead of
/// dividing by zero. Malformed history entries are skipped. Adding a
/// completion on an expected day inside the window can only raise the
/// result; removing one can only lower it.
pub fn completion_rate(
    history: &[String],
    frequency: HabitFrequency,
    today: NaiveDate,
    window_days: u32,
) -> u8 {
    if window_days == 0 {
        return 0;
    }

    let days = parse_history(history);
    let start = add_days(today, -(window_days as i64 - 1));
    let step = step_days(frequency);

    let mut expected = 0u32;
    let mut hit = 0u32;
    let mut cursor = start;
    while cursor <= today {
        expected += 1;
        if days.contains(&cursor) {
            hit += 1;
        }
        cursor = add_days(cursor, step);
    }

    if expected == 0 {
        return 0;
    }
    ((hit * 100) as f64 / expected as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::calendar::{parse_day, to_iso};

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn test_empty_history_is_zero() {
        assert_eq!(
            completion_rate(&[], HabitFrequency::Daily, day("2024-03-31"), 90),
            0
        );
    }

    #[test]
    fn test_zero_window_is_zero() {
        let history = vec!["2024-03-31".to_string()];
        assert_eq!(
            completion_rate(&history, HabitFrequency::Daily, day("2024-03-31"), 0),
            0
        );
    }

    #[test]
    fn test_full_window_is_hundred() {
        let today = day("2024-01-10");
        let history: Vec<String> = (0..10).map(|i| to_iso(add_days(today, -i))).collect();
        assert_eq!(
            completion_rate(&history, HabitFrequency::Daily, today, 10),
            100
        );
    }

    #[test]
    fn test_half_window_rounds() {
        let today = day("2024-01-10");
        // 5 of 10 expected days completed.
        let history: Vec<String> = (0..5).map(|i| to_iso(add_days(today, -i))).collect();
        assert_eq!(
            completion_rate(&history, HabitFrequency::Daily, today, 10),
            50
        );
        // 1 of 3 = 33.33 rounds down to 33.
        assert_eq!(
            completion_rate(&history[..1].to_vec(), HabitFrequency::Daily, today, 3),
            33
        );
    }

    #[test]
    fn test_dates_outside_window_ignored() {
        let today = day("2024-06-01");
        let history = vec!["2020-01-01".to_string(), "2024-06-01".to_string()];
        assert_eq!(
            completion_rate(&history, HabitFrequency::Daily, today, 10),
            10
        );
    }

    #[test]
    fn test_weekly_expected_keys() {
        let today = day("2024-03-30");
        // 28-day window, weekly step => expected keys at start, +7, +14, +21.
        let start = add_days(today, -27);
        let history: Vec<String> = (0..4).map(|i| to_iso(add_days(start, i * 7))).collect();
        assert_eq!(
            completion_rate(&history, HabitFrequency::Weekly, today, 28),
            100
        );
        assert_eq!(
            completion_rate(&history[..2].to_vec(), HabitFrequency::Weekly, today, 28),
            50
        );
    }

    #[test]
    fn test_weekly_off_key_completion_does_not_count() {
        let today = day("2024-03-30");
        let start = add_days(today, -27);
        // Completed the day after each expected weekly key.
        let history: Vec<String> = (0..4).map(|i| to_iso(add_days(start, i * 7 + 1))).collect();
        assert_eq!(
            completion_rate(&history, HabitFrequency::Weekly, today, 28),
            0
        );
    }

    #[test]
    fn test_monotonic_under_toggle() {
        let today = day("2024-02-20");
        let mut history: Vec<String> = (0..8).map(|i| to_iso(add_days(today, -i * 2))).collect();
        let before = completion_rate(&history, HabitFrequency::Daily, today, 30);

        // Adding an in-window completion never lowers the rate.
        history.push(to_iso(add_days(today, -1)));
        let after_add = completion_rate(&history, HabitFrequency::Daily, today, 30);
        assert!(after_add >= before);

        // Removing it never raises the rate back above the added value.
        history.pop();
        let after_remove = completion_rate(&history, HabitFrequency::Daily, today, 30);
        assert!(after_remove <= after_add);
        assert_eq!(after_remove, before);
    }

    #[test]
    fn test_result_bounded() {
        let today = day("2024-01-31");
        let history: Vec<String> = (0..100).map(|i| to_iso(add_days(today, -i))).collect();
        let rate = completion_rate(&history, HabitFrequency::Daily, today, 90);
        assert!(rate <= 100);
        assert_eq!(rate, 100);
    }
}
