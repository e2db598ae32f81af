/// Mood statistics engine
///
/// Pure functions that turn one user's entries into the aggregates the rest
/// of the server displays: rolling averages, streaks, recent views, anomaly
/// flags, distributions and weekday patterns. Nothing here does I/O or keeps
/// state between calls, and every function accepts entries in any order.

pub mod anomaly;
pub mod average;
pub mod distribution;
pub mod pattern;
pub mod streak;
pub mod summary;

pub use anomaly::*;
pub use average::*;
pub use distribution::*;
pub use pattern::*;
pub use streak::*;
pub use summary::*;

use crate::domain::MoodEntry;

/// Borrow entries sorted oldest first
///
/// Storage order is not chronological, so every order-sensitive computation
/// goes through here. The sort is stable for equal timestamps.
pub(crate) fn chronological(entries: &[MoodEntry]) -> Vec<&MoodEntry> {
    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::domain::{DetectionMethod, EntryId, MoodEntry};

    pub const DAY_MS: i64 = 86_400_000;

    /// Midnight UTC, 2024-03-04 (a Monday)
    pub fn t0() -> i64 {
        Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap().timestamp_millis()
    }

    /// Entry whose date is derived from its UTC timestamp
    pub fn entry_at(mood: u8, timestamp: i64) -> MoodEntry {
        let date = Utc.timestamp_millis_opt(timestamp).unwrap().date_naive();
        MoodEntry::from_existing(
            EntryId::new(),
            date,
            mood,
            String::new(),
            timestamp,
            Some(DetectionMethod::Manual),
            None,
        )
    }

    /// Entry on a specific calendar date, logged at noon UTC
    pub fn entry_on(date: NaiveDate, mood: u8) -> MoodEntry {
        let timestamp = date
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        MoodEntry::from_existing(
            EntryId::new(),
            date,
            mood,
            String::new(),
            timestamp,
            None,
            None,
        )
    }

    /// One entry per day starting at `t0`, with the given moods
    pub fn daily(moods: &[u8]) -> Vec<MoodEntry> {
        moods
            .iter()
            .enumerate()
            .map(|(i, mood)| entry_at(*mood, t0() + i as i64 * DAY_MS))
            .collect()
    }
}
