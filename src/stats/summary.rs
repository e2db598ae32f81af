/// Dashboard summary, milestones and the low-mood alert
///
/// These combine the primitive statistics into the views a client shows
/// first: the weekly average, current streak, recent entries and today's
/// score.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::MoodEntry;
use crate::stats::{
    rolling_average, select_recent, streak, today_mood, DEFAULT_RECENT_COUNT,
    DEFAULT_ROLLING_WINDOW,
};

/// Mean of the latest few entries below which the alert fires
pub const LOW_MOOD_ALERT_THRESHOLD: f64 = 4.0;

/// Entries the alert looks at
pub const LOW_MOOD_ALERT_WINDOW: usize = 3;

/// Headline statistics for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodSummary {
    /// Rolling average over the default window, 0 when there are no entries
    pub average: f64,
    pub streak: u32,
    /// Newest first
    pub recent: Vec<MoodEntry>,
    pub total: usize,
    pub today_mood: Option<u8>,
}

impl MoodSummary {
    /// Compute the summary with `today` as the streak reference date
    pub fn compute(entries: &[MoodEntry], today: NaiveDate) -> Self {
        Self {
            average: rolling_average(entries, DEFAULT_ROLLING_WINDOW),
            streak: streak(entries, today),
            recent: select_recent(entries, DEFAULT_RECENT_COUNT),
            total: entries.len(),
            today_mood: today_mood(entries, today),
        }
    }

    /// Whether the recent entries trip the low-mood alert
    pub fn low_mood_alert(&self) -> bool {
        low_mood_alert(&self.recent)
    }

    pub fn tier(&self) -> AverageTier {
        AverageTier::from_average(self.average)
    }
}

/// True when the latest three entries average below the alert threshold
///
/// `recent` must be newest first, as returned by `select_recent`. Fewer than
/// three entries never alert.
pub fn low_mood_alert(recent: &[MoodEntry]) -> bool {
    if recent.len() < LOW_MOOD_ALERT_WINDOW {
        return false;
    }
    let sum: u32 = recent[..LOW_MOOD_ALERT_WINDOW].iter().map(|e| e.mood as u32).sum();
    (sum as f64 / LOW_MOOD_ALERT_WINDOW as f64) < LOW_MOOD_ALERT_THRESHOLD
}

/// Coarse reading of the rolling average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageTier {
    /// No data yet
    Empty,
    Thriving,
    Balanced,
    Struggling,
}

impl AverageTier {
    pub fn from_average(avg: f64) -> Self {
        if avg >= 7.0 {
            AverageTier::Thriving
        } else if avg >= 4.0 {
            AverageTier::Balanced
        } else if avg >= 1.0 {
            AverageTier::Struggling
        } else {
            AverageTier::Empty
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AverageTier::Empty => "Start tracking to see your weekly mood average and unlock personalized insights.",
            AverageTier::Thriving => "Your mental clarity is thriving. Focus on maintaining these high-impact habits.",
            AverageTier::Balanced => "You are navigating life with balance. Small reflections today lead to stability tomorrow.",
            AverageTier::Struggling => "Your wellbeing is our priority. Please take a moment for gentle self-care today.",
        }
    }
}

/// An achievement unlocked by logging consistently
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestone {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub achieved: bool,
}

/// All milestones with their current state, in display order
pub fn milestones(streak: u32, total: usize) -> Vec<Milestone> {
    vec![
        Milestone {
            icon: "🎯",
            title: "First Entry",
            description: "Started your journey",
            achieved: total >= 1,
        },
        Milestone {
            icon: "🔥",
            title: "7-Day Streak",
            description: "Consistent reflection",
            achieved: streak >= 7,
        },
        Milestone {
            icon: "💎",
            title: "Power User",
            description: "Log for 30 days",
            achieved: total >= 30,
        },
        Milestone {
            icon: "🌟",
            title: "Wellness Star",
            description: "14-day streak",
            achieved: streak >= 14,
        },
    ]
}
