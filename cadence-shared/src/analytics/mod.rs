/// Habit analytics engine
///
/// Pure, synchronous calculations over a habit's completion history:
///
/// - `calendar`: day parsing, formatting, and arithmetic
/// - `streak`: current and best-ever consecutive-interval streaks
/// - `rate`: rolling completion rate over a trailing window
/// - `history`: pure history mutation (toggle a day)
///
/// Every function takes the reference "today" explicitly where it matters
/// and treats the raw history as untrusted input: malformed entries are
/// filtered, never fatal, and an empty history yields zeros rather than
/// errors.
///
/// # Example
///
/// ```
/// use cadence_shared::analytics::{calendar, rate, streak};
/// use cadence_shared::models::habit::HabitFrequency;
///
/// let history: Vec<String> = (1..=7).map(|d| format!("2024-01-{:02}", d)).collect();
/// let today = calendar::parse_day("2024-01-07").unwrap();
///
/// assert_eq!(streak::current_streak(&history, HabitFrequency::Daily, today), 7);
/// assert_eq!(streak::best_streak(&history, HabitFrequency::Daily), 7);
/// assert_eq!(rate::completion_rate(&history, HabitFrequency::Daily, today, 7), 100);
/// ```

pub mod calendar;
pub mod history;
pub mod rate;
pub mod streak;
