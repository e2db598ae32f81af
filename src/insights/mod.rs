/// Insight generation around the statistics engine
///
/// An `InsightProvider` turns aggregates into free-text guidance. The
/// provider itself is a collaborator (an external AI service, or the local
/// `RuleBasedProvider`); this module owns the request shape, the cache the
/// calling layer keeps in front of it and the retry policy for rate limits.

pub mod cache;
pub mod retry;
pub mod rules;
pub mod service;

pub use cache::*;
pub use retry::*;
pub use rules::*;
pub use service::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{MoodEntry, UserId};

/// Entries required before an improvement plan is requested
pub const PLAN_MIN_ENTRIES: usize = 5;

/// Trailing entries included in an improvement plan's context
pub const PLAN_CONTEXT_ENTRIES: usize = 14;

/// Errors that can occur while generating insights
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightError {
    #[error("Insight provider is rate limited")]
    RateLimited,

    #[error("Quota exhausted. Cooling down ({remaining_secs}s remaining).")]
    CoolingDown { remaining_secs: u64 },

    #[error("Not enough data: {needed} entries needed, {available} logged")]
    NotEnoughData { needed: usize, available: usize },

    #[error("Insight provider error: {0}")]
    Provider(String),
}

/// What kind of guidance is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// A few actionable suggestions based on the past week
    Recommendations,
    /// A two-week plan based on the longer history
    ImprovementPlan,
}

impl InsightKind {
    /// Short prefix used in cache keys
    pub fn cache_prefix(&self) -> &'static str {
        match self {
            InsightKind::Recommendations => "recs",
            InsightKind::ImprovementPlan => "plan",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommendations" | "recs" => Some(InsightKind::Recommendations),
            "plan" | "improvement_plan" => Some(InsightKind::ImprovementPlan),
            _ => None,
        }
    }
}

/// Aggregates handed to a provider
///
/// For recommendations `entries` holds the recent entries (newest first);
/// for a plan it holds the whole history.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRequest {
    pub kind: InsightKind,
    /// Scope the aggregates were computed for, `None` for anonymous
    pub user: Option<UserId>,
    pub average: f64,
    pub entries: Vec<MoodEntry>,
}

impl InsightRequest {
    pub fn recommendations(average: f64, recent: Vec<MoodEntry>) -> Self {
        Self {
            kind: InsightKind::Recommendations,
            user: None,
            average,
            entries: recent,
        }
    }

    /// Build a plan request, refusing histories that are too short
    pub fn improvement_plan(average: f64, entries: Vec<MoodEntry>) -> Result<Self, InsightError> {
        if entries.len() < PLAN_MIN_ENTRIES {
            return Err(InsightError::NotEnoughData {
                needed: PLAN_MIN_ENTRIES,
                available: entries.len(),
            });
        }
        Ok(Self {
            kind: InsightKind::ImprovementPlan,
            user: None,
            average,
            entries,
        })
    }

    pub fn for_user(mut self, user: Option<UserId>) -> Self {
        self.user = user;
        self
    }

    /// Entry lines a provider prompt is built from
    pub fn context(&self) -> String {
        match self.kind {
            InsightKind::Recommendations => self
                .entries
                .iter()
                .map(|e| {
                    let note = if e.has_note() { e.note.as_str() } else { "None" };
                    format!("{}: Mood {}/10. Note: {}", e.date, e.mood, note)
                })
                .collect::<Vec<_>>()
                .join("\n"),
            InsightKind::ImprovementPlan => {
                let sorted = crate::stats::chronological(&self.entries);
                let start = sorted.len().saturating_sub(PLAN_CONTEXT_ENTRIES);
                sorted[start..]
                    .iter()
                    .map(|e| format!("{}: {}/10", e.date, e.mood))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    }
}

/// Something that can turn an insight request into guidance text
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn generate(&self, request: &InsightRequest) -> Result<String, InsightError>;
}
