/// Core types and enums used throughout the domain layer
///
/// This module defines the ID types, the detection method tag and the mood
/// scale that are used by MoodEntry and the statistics engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a mood entry
///
/// This is a wrapper around UUID to provide type safety. It is the storage
/// key only and never appears in the exported record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entry ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of the user owning a set of entries
///
/// Opaque to this crate: whatever the session layer hands us. Every store
/// call and statistics request carries one explicitly (or `None` for
/// anonymous mode).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUserId(
                "User ID cannot be empty".to_string()
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a mood score was obtained
///
/// Informational only; aggregates treat both sources identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionMethod {
    /// Score picked by the user
    #[serde(rename = "manual")]
    Manual,
    /// Score inferred from a camera snapshot by the external vision service
    #[serde(rename = "ai-vision")]
    AiVision,
}

impl DetectionMethod {
    /// Tag used in the persisted record and in the database
    pub fn as_tag(&self) -> &'static str {
        match self {
            DetectionMethod::Manual => "manual",
            DetectionMethod::AiVision => "ai-vision",
        }
    }

    /// Parse a persisted tag
    pub fn from_tag(tag: &str) -> Result<Self, DomainError> {
        match tag {
            "manual" => Ok(DetectionMethod::Manual),
            "ai-vision" | "camera" => Ok(DetectionMethod::AiVision),
            other => Err(DomainError::InvalidDetectionMethod(other.to_string())),
        }
    }
}

/// One step on the 1-10 mood scale with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodLevel {
    pub score: u8,
    pub label: &'static str,
    pub emoji: &'static str,
}

const MOOD_SCALE: [MoodLevel; 10] = [
    MoodLevel { score: 1, label: "Very Low", emoji: "😢" },
    MoodLevel { score: 2, label: "Low", emoji: "😢" },
    MoodLevel { score: 3, label: "Down", emoji: "😢" },
    MoodLevel { score: 4, label: "Meh", emoji: "😐" },
    MoodLevel { score: 5, label: "Neutral", emoji: "😐" },
    MoodLevel { score: 6, label: "Okay", emoji: "😐" },
    MoodLevel { score: 7, label: "Good", emoji: "🙂" },
    MoodLevel { score: 8, label: "Great", emoji: "🙂" },
    MoodLevel { score: 9, label: "Excellent", emoji: "😄" },
    MoodLevel { score: 10, label: "Amazing", emoji: "😄" },
];

impl MoodLevel {
    /// Look up the level for a (possibly fractional) score
    ///
    /// Averages are rounded to the nearest integer; anything off the scale
    /// falls back to Neutral.
    pub fn for_score(score: f64) -> MoodLevel {
        let rounded = score.round();
        if (1.0..=10.0).contains(&rounded) {
            MOOD_SCALE[rounded as usize - 1]
        } else {
            MOOD_SCALE[4]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_rejects_blank() {
        assert!(UserId::new("   ").is_err());
        assert_eq!(UserId::new(" user_1 ").unwrap().as_str(), "user_1");
    }

    #[test]
    fn test_detection_method_tags() {
        assert_eq!(DetectionMethod::from_tag("ai-vision").unwrap(), DetectionMethod::AiVision);
        assert_eq!(DetectionMethod::from_tag("camera").unwrap(), DetectionMethod::AiVision);
        assert_eq!(DetectionMethod::Manual.as_tag(), "manual");
        assert!(DetectionMethod::from_tag("guess").is_err());
    }

    #[test]
    fn test_mood_level_lookup() {
        assert_eq!(MoodLevel::for_score(9.0).label, "Excellent");
        assert_eq!(MoodLevel::for_score(6.6).label, "Good");
        assert_eq!(MoodLevel::for_score(0.0).label, "Neutral");
        assert_eq!(MoodLevel::for_score(12.0).score, 5);
    }
}
