/// Sudden mood drop detection
///
/// Every chronologically adjacent pair is compared on its own. Elapsed time
/// between the two entries is not considered, so a drop logged a month apart
/// is flagged the same way as one logged an hour apart.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::MoodEntry;
use crate::stats::chronological;

/// Minimum point decline between consecutive entries that counts as an anomaly
pub const ANOMALY_DROP_THRESHOLD: i32 = 3;

/// A drop of at least `ANOMALY_DROP_THRESHOLD` points, reported on the later entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub timestamp: i64,
    pub drop: i32,
    pub from: u8,
    pub to: u8,
    pub note: String,
}

/// Find all qualifying drops, most recent first
///
/// A decline that cascades over several entries yields one record per pair.
pub fn detect_anomalies(entries: &[MoodEntry]) -> Vec<Anomaly> {
    let sorted = chronological(entries);

    let mut anomalies: Vec<Anomaly> = sorted
        .windows(2)
        .filter_map(|pair| {
            let (prev, current) = (pair[0], pair[1]);
            let drop = prev.mood as i32 - current.mood as i32;
            (drop >= ANOMALY_DROP_THRESHOLD).then(|| Anomaly {
                date: current.date,
                timestamp: current.timestamp,
                drop,
                from: prev.mood,
                to: current.mood,
                note: current.note.clone(),
            })
        })
        .collect();

    anomalies.reverse();
    anomalies
}
