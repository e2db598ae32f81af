/// Tool for logging a mood entry
///
/// This module implements the mood_log MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DetectionMethod, MoodEntry, MoodLevel};
use crate::stats::MoodSummary;
use crate::storage::EntryStore;
use crate::tools::{RequestContext, ToolError};

/// Parameters for logging a mood
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogMoodParams {
    /// Mood score from 1 (very low) to 10 (amazing)
    pub mood: i64,
    /// Optional note, up to 200 characters
    pub note: Option<String>,
    /// "manual" (default) or "ai-vision"
    pub detection_method: Option<String>,
    /// User to log for; defaults to the server's user
    pub user_id: Option<String>,
}

/// Response from logging a mood
#[derive(Debug, Serialize)]
pub struct LogMoodResponse {
    pub success: bool,
    pub message: String,
    pub entry: MoodEntry,
    pub current_streak: u32,
    pub average: f64,
}

/// Validate and append a new entry, then report the refreshed streak
pub fn log_mood<S: EntryStore>(
    storage: &S,
    ctx: &RequestContext,
    params: LogMoodParams,
) -> Result<LogMoodResponse, ToolError> {
    let user = ctx.resolve_user(params.user_id.as_deref())?;
    let mood = MoodEntry::validate_mood(params.mood)?;
    let method = match params.detection_method.as_deref() {
        Some(tag) => DetectionMethod::from_tag(tag)?,
        None => DetectionMethod::Manual,
    };

    let entry = MoodEntry::logged_at(user.clone(), mood, params.note, method, ctx.now)?;
    storage.append(&entry)?;
    tracing::debug!("Logged mood {} for {}", entry.mood, crate::tools::scope_name(user.as_ref()));

    let entries = storage.load(user.as_ref())?;
    let summary = MoodSummary::compute(&entries, ctx.today());
    let level = MoodLevel::for_score(entry.mood as f64);

    let mut message = format!(
        "{} Logged {}/10 ({}). Current streak: {} day{}",
        level.emoji,
        entry.mood,
        level.label,
        summary.streak,
        if summary.streak == 1 { "" } else { "s" }
    );
    if summary.low_mood_alert() {
        message.push_str(
            "\n🚨 Your last few entries have been consistently low. Please consider reaching out for support.",
        );
    }

    Ok(LogMoodResponse {
        success: true,
        message,
        entry,
        current_streak: summary.streak,
        average: summary.average,
    })
}
