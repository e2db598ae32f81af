/// Rolling averages and the recent-entries view

use crate::domain::MoodEntry;
use crate::stats::chronological;

/// Entries included in the headline average
pub const DEFAULT_ROLLING_WINDOW: usize = 7;

/// Entries shown in the recent view
pub const DEFAULT_RECENT_COUNT: usize = 7;

/// Mean mood over the last `window` entries, rounded to one decimal
///
/// The window counts entries, not calendar days. Returns `0.0` for an empty
/// list (or a zero window); callers that need to tell that apart from a real
/// score check the entry count.
pub fn rolling_average(entries: &[MoodEntry], window: usize) -> f64 {
    let sorted = chronological(entries);
    let take = window.min(sorted.len());
    if take == 0 {
        return 0.0;
    }

    let sum: i64 = sorted[sorted.len() - take..]
        .iter()
        .map(|e| e.mood as i64)
        .sum();
    round_one_decimal(sum as f64 / take as f64)
}

/// The `n` most recent entries, newest first
///
/// Entries sharing a timestamp keep their input order.
pub fn select_recent(entries: &[MoodEntry], n: usize) -> Vec<MoodEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(n);
    sorted
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
