/// Consecutive-day streak calculation
///
/// A streak is the unbroken run of calendar days with at least one entry,
/// ending at a reference date the caller supplies. Gaps further back in
/// history don't matter, and several entries on one day count once.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::MoodEntry;

/// Count consecutive logged days walking back from `reference_date`
///
/// Returns 0 when nothing was logged on the reference date itself.
pub fn streak(entries: &[MoodEntry], reference_date: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut count = 0;
    let mut checking_date = Some(reference_date);
    while let Some(date) = checking_date {
        if !dates.contains(&date) {
            break;
        }
        count += 1;
        checking_date = date.pred_opt();
    }
    count
}

/// Mood of the first entry logged on `today`, if any
pub fn today_mood(entries: &[MoodEntry], today: NaiveDate) -> Option<u8> {
    entries.iter().find(|e| e.date == today).map(|e| e.mood)
}
