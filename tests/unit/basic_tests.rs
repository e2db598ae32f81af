/// Basic unit tests to verify core functionality
use chrono::{NaiveDate, TimeZone, Utc};
use mood_tracker_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    /// Entries one day apart starting Monday 2024-03-04, logged at midnight UTC
    fn history(moods: &[u8]) -> Vec<MoodEntry> {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        moods
            .iter()
            .enumerate()
            .map(|(i, mood)| {
                let at = start + chrono::Duration::days(i as i64);
                MoodEntry::from_existing(
                    EntryId::new(),
                    at.date_naive(),
                    *mood,
                    String::new(),
                    at.timestamp_millis(),
                    Some(DetectionMethod::Manual),
                    None,
                )
            })
            .collect()
    }

    #[test]
    fn test_entry_creation() {
        let user = UserId::new("user_1").unwrap();
        let entry = MoodEntry::new(Some(user.clone()), 7, Some("Great run".to_string()), DetectionMethod::Manual);

        assert!(entry.is_ok());
        let entry = entry.unwrap();
        assert_eq!(entry.mood, 7);
        assert_eq!(entry.user_id, Some(user));
        assert!(entry.has_note());
    }

    #[test]
    fn test_entry_validation() {
        assert!(MoodEntry::new(None, 0, None, DetectionMethod::Manual).is_err());
        assert!(MoodEntry::new(None, 11, None, DetectionMethod::Manual).is_err());
        assert!(MoodEntry::new(None, 5, Some("é".repeat(200)), DetectionMethod::Manual).is_ok());
        assert!(MoodEntry::new(None, 5, Some("é".repeat(201)), DetectionMethod::Manual).is_err());
    }

    #[test]
    fn test_engine_on_unsorted_input() {
        let mut entries = history(&[6, 9, 5, 8]);
        entries.reverse();

        assert_eq!(rolling_average(&entries, 2), 6.5);
        let recent = select_recent(&entries, 2);
        assert_eq!(recent.iter().map(|e| e.mood).collect::<Vec<_>>(), vec![8, 5]);

        let anomalies = detect_anomalies(&entries);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].from, 9);
        assert_eq!(anomalies[0].to, 5);
        assert_eq!(anomalies[0].drop, 4);
    }

    #[test]
    fn test_streak_needs_reference_day() {
        let entries = history(&[5, 5, 5]);
        let last = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();

        assert_eq!(streak(&entries, last), 3);
        assert_eq!(streak(&entries, last.succ_opt().unwrap()), 0);
    }

    #[test]
    fn test_distribution_shares() {
        let dist = distribution(&history(&[9, 6, 6, 2]), DEFAULT_DISTRIBUTION_WINDOW);

        assert_eq!((dist.great, dist.good, dist.low), (1, 2, 1));
        assert_eq!(dist.shares.great, 25.0);
        assert_eq!(dist.shares.good, 50.0);

        let empty = distribution(&[], DEFAULT_DISTRIBUTION_WINDOW);
        assert!(empty.is_empty());
        assert_eq!(empty.shares.low, 0.0);
    }

    #[test]
    fn test_day_of_week_pattern_in_utc() {
        let pattern = day_of_week_pattern(&history(&[3, 8, 6, 6, 6, 6, 6]), &Utc);

        assert_eq!(pattern.peak_day, Some(chrono::Weekday::Tue));
        assert_eq!(pattern.challenging_day, Some(chrono::Weekday::Mon));
        assert_eq!(pattern.days.len(), PATTERN_MIN_ENTRIES);
    }

    #[test]
    fn test_mood_levels() {
        assert_eq!(MoodLevel::for_score(9.6).label, "Amazing");
        assert_eq!(MoodLevel::for_score(0.0).label, "Neutral");
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());
    }
}
