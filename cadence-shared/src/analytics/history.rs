/// Habit history mutation
///
/// History edits are pure transforms: the input is never mutated, the
/// caller receives a fresh vector. That lets the surrounding application
/// apply the new history optimistically, keep the old one for rollback,
/// and diff the two (see [`crate::mutation`]).

/// Toggles a day in a completion history
///
/// If `date` is present it is removed, otherwise inserted. The result is
/// always deduplicated and sorted ascending; for well-formed `YYYY-MM-DD`
/// strings lexicographic order is chronological order. Entries other than
/// the toggled one pass through byte-for-byte, so stored history values
/// round-trip exactly.
pub fn toggle_day(history: &[String], date: &str) -> Vec<String> {
    let mut next: Vec<String> = if history.iter().any(|d| d == date) {
        history.iter().filter(|d| *d != date).cloned().collect()
    } else {
        let mut v = history.to_vec();
        v.push(date.to_string());
        v
    };
    next.sort();
    next.dedup();
    next
}
