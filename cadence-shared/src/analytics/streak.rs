/// Streak calculation over a habit's completion history
///
/// A streak is a run of consecutive qualifying intervals with no gap. The
/// interval step comes from the habit's frequency: daily and monthly
/// habits step one day at a time, weekly habits step seven. Consecutive-ness
/// is decided by whole-day difference, never by string comparison, so runs
/// stay correct across month and year boundaries.
///
/// Both functions take the reference "today" as an explicit parameter so
/// results are deterministic and testable without touching the clock.

use chrono::NaiveDate;

use super::calendar::{add_days, days_between, parse_history};
use crate::models::habit::HabitFrequency;

/// Interval step in days for a habit frequency
///
/// Monthly habits are evaluated on a daily step, same as the reference
/// behavior; only weekly habits widen the interval.
pub fn step_days(frequency: HabitFrequency) -> i64 {
    match frequency {
        HabitFrequency::Weekly => 7,
        HabitFrequency::Daily | HabitFrequency::Monthly => 1,
    }
}

/// Current streak ending at `today`
///
/// Walks backward from `today` in steps of `step_days(frequency)`, counting
/// while each visited day is present in the history. The streak is "active"
/// only if today's interval itself is completed: if `today` is absent the
/// result is 0 regardless of older runs. Empty (or entirely malformed)
/// history yields 0.
pub fn current_streak(history: &[String], frequency: HabitFrequency, today: NaiveDate) -> u32 {
    let days = parse_history(history);
    if days.is_empty() {
        return 0;
    }

    let step = step_days(frequency);
    let mut streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        streak += 1;
        cursor = add_days(cursor, -step);
    }
    streak
}

/// Best-ever streak anywhere in the history
///
/// Groups the sorted unique days into maximal runs where consecutive days
/// differ by exactly the step, and returns the longest run's length. A
/// single isolated day counts as a run of 1; any other gap breaks the run.
/// Empty history yields 0, so `best_streak >= current_streak` always holds.
pub fn best_streak(history: &[String], frequency: HabitFrequency) -> u32 {
    let days = parse_history(history);
    let step = step_days(frequency);

    let mut best = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for day in days {
        run = match prev {
            Some(p) if days_between(p, day) == step => run + 1,
            _ => {
                best = best.max(run);
                1
            }
        };
        prev = Some(day);
    }
    best.max(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso_days(days: &[&str]) -> Vec<String> {
        days.iter().map(|d| d.to_string()).collect()
    }

    fn day(s: &str) -> NaiveDate {
        super::super::calendar::parse_day(s).unwrap()
    }

    #[test]
    fn test_step_days() {
        assert_eq!(step_days(HabitFrequency::Daily), 1);
        assert_eq!(step_days(HabitFrequency::Weekly), 7);
        assert_eq!(step_days(HabitFrequency::Monthly), 1);
    }

    #[test]
    fn test_current_streak_empty_history() {
        assert_eq!(
            current_streak(&[], HabitFrequency::Daily, day("2024-01-07")),
            0
        );
    }

    #[test]
    fn test_current_streak_seven_consecutive_days() {
        let history = iso_days(&[
            "2024-01-01",
            "2024-01-02",
            "2024-01-03",
            "2024-01-04",
            "2024-01-05",
            "2024-01-06",
            "2024-01-07",
        ]);
        assert_eq!(
            current_streak(&history, HabitFrequency::Daily, day("2024-01-07")),
            7
        );
        assert_eq!(best_streak(&history, HabitFrequency::Daily), 7);
    }

    #[test]
    fn test_current_streak_zero_when_today_missing() {
        let history = iso_days(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        // Older streak exists but today's completion is absent.
        assert_eq!(
            current_streak(&history, HabitFrequency::Daily, day("2024-01-05")),
            0
        );
    }

    #[test]
    fn test_current_streak_gap_yesterday() {
        let history = iso_days(&["2024-01-01", "2024-01-03"]);
        assert_eq!(
            current_streak(&history, HabitFrequency::Daily, day("2024-01-03")),
            1
        );
        assert_eq!(best_streak(&history, HabitFrequency::Daily), 1);
    }

    #[test]
    fn test_current_streak_weekly() {
        // Two Sundays a week apart.
        let history = iso_days(&["2024-01-07", "2024-01-14"]);
        assert_eq!(
            current_streak(&history, HabitFrequency::Weekly, day("2024-01-14")),
            2
        );
    }

    #[test]
    fn test_weekly_streak_broken_by_off_step_day() {
        // A completion six days after the last one does not extend a
        // weekly streak.
        let history = iso_days(&["2024-01-07", "2024-01-13"]);
        assert_eq!(
            current_streak(&history, HabitFrequency::Weekly, day("2024-01-13")),
            1
        );
    }

    #[test]
    fn test_current_streak_property_n_plus_one() {
        // Every interval in the last n steps present => streak == n + 1.
        for n in 0..10i64 {
            let today = day("2024-03-15");
            let history: Vec<String> = (0..=n)
                .map(|i| super::super::calendar::to_iso(add_days(today, -i)))
                .collect();
            assert_eq!(
                current_streak(&history, HabitFrequency::Daily, today),
                (n + 1) as u32
            );
        }
    }

    #[test]
    fn test_best_streak_empty() {
        assert_eq!(best_streak(&[], HabitFrequency::Daily), 0);
    }

    #[test]
    fn test_best_streak_longest_run_wins() {
        let history = iso_days(&[
            "2024-01-01",
            "2024-01-02",
            // gap
            "2024-01-10",
            "2024-01-11",
            "2024-01-12",
            "2024-01-13",
            // gap
            "2024-01-20",
        ]);
        assert_eq!(best_streak(&history, HabitFrequency::Daily), 4);
    }

    #[test]
    fn test_best_streak_across_month_boundary() {
        let history = iso_days(&["2024-01-30", "2024-01-31", "2024-02-01", "2024-02-02"]);
        assert_eq!(best_streak(&history, HabitFrequency::Daily), 4);
    }

    #[test]
    fn test_best_streak_ignores_duplicates_and_garbage() {
        let history = iso_days(&[
            "2024-01-01",
            "2024-01-01",
            "2024-01-02",
            "never",
            "2024-01-03",
        ]);
        assert_eq!(best_streak(&history, HabitFrequency::Daily), 3);
    }

    #[test]
    fn test_best_streak_ge_current_streak() {
        let histories = vec![
            iso_days(&[]),
            iso_days(&["2024-01-01"]),
            iso_days(&["2024-01-05", "2024-01-06", "2024-01-07"]),
            iso_days(&["2023-12-01", "2023-12-02", "2024-01-07"]),
        ];
        for history in histories {
            let today = day("2024-01-07");
            assert!(
                best_streak(&history, HabitFrequency::Daily)
                    >= current_streak(&history, HabitFrequency::Daily, today)
            );
        }
    }
}
