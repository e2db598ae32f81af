/// MoodEntry entity for daily mood logs
///
/// This module defines the MoodEntry struct that represents a single mood
/// score logged by a user, with an optional note and the way it was detected.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::domain::{DetectionMethod, DomainError, EntryId, UserId};

/// Lowest score on the mood scale
pub const MIN_MOOD: u8 = 1;
/// Highest score on the mood scale
pub const MAX_MOOD: u8 = 10;
/// Maximum note length, in characters
pub const MAX_NOTE_CHARS: usize = 200;

/// A single mood log record
///
/// Entries are created once and never edited. `date` is the user-local
/// calendar day used for streaks and `timestamp` (epoch milliseconds) is the
/// creation instant used for ordering; two entries can share a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Storage key, not part of the exported record
    #[serde(skip, default)]
    pub id: EntryId,
    /// Calendar day this entry counts for
    pub date: NaiveDate,
    /// Mood score from 1 to 10
    pub mood: u8,
    /// Free text note, possibly empty
    #[serde(default)]
    pub note: String,
    /// Creation instant in epoch milliseconds
    pub timestamp: i64,
    /// Whether the score was picked manually or inferred from the camera
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_method: Option<DetectionMethod>,
    /// Owning user, `None` for anonymous mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl MoodEntry {
    /// Create a new entry logged right now, in local time
    pub fn new(
        user_id: Option<UserId>,
        mood: u8,
        note: Option<String>,
        detection_method: DetectionMethod,
    ) -> Result<Self, DomainError> {
        Self::logged_at(user_id, mood, note, detection_method, Local::now())
    }

    /// Create a new entry logged at a given instant
    ///
    /// The calendar date is taken in the instant's own timezone, so callers
    /// pass a `DateTime<Local>` for user-local days.
    pub fn logged_at<Tz: TimeZone>(
        user_id: Option<UserId>,
        mood: u8,
        note: Option<String>,
        detection_method: DetectionMethod,
        at: DateTime<Tz>,
    ) -> Result<Self, DomainError> {
        let mood = Self::validate_mood(mood as i64)?;
        let note = note.map(|n| n.trim().to_string()).unwrap_or_default();
        Self::validate_note(&note)?;

        Ok(Self {
            id: EntryId::new(),
            date: at.date_naive(),
            mood,
            note,
            timestamp: at.timestamp_millis(),
            detection_method: Some(detection_method),
            user_id,
        })
    }

    /// Create an entry from existing data (used when loading from database)
    ///
    /// No validation happens here; the statistics engine passes stored
    /// values through as they are.
    pub fn from_existing(
        id: EntryId,
        date: NaiveDate,
        mood: u8,
        note: String,
        timestamp: i64,
        detection_method: Option<DetectionMethod>,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            id,
            date,
            mood,
            note,
            timestamp,
            detection_method,
            user_id,
        }
    }

    /// Check if this entry has a non-blank note
    pub fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }

    /// Validate a raw mood score, returning it narrowed to `u8`
    pub fn validate_mood(mood: i64) -> Result<u8, DomainError> {
        if mood < MIN_MOOD as i64 || mood > MAX_MOOD as i64 {
            return Err(DomainError::InvalidMood(mood));
        }
        Ok(mood as u8)
    }

    fn validate_note(note: &str) -> Result<(), DomainError> {
        let chars = note.chars().count();
        if chars > MAX_NOTE_CHARS {
            return Err(DomainError::NoteTooLong(chars));
        }
        Ok(())
    }
}
