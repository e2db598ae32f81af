/// Tool for the day-of-week mood pattern
///
/// This module implements the mood_patterns MCP tool. Weekdays are read in
/// the server's local timezone and the pattern is only reported once a week
/// of entries exists.

use chrono::Local;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::stats::{day_of_week_pattern, weekday_name, DayOfWeekPattern, PATTERN_MIN_ENTRIES};
use crate::storage::EntryStore;
use crate::tools::{RequestContext, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PatternsParams {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PatternsResponse {
    /// Absent until enough entries are logged
    pub pattern: Option<DayOfWeekPattern>,
    pub entries_needed: usize,
    pub message: String,
}

pub fn get_mood_patterns<S: EntryStore>(
    storage: &S,
    ctx: &RequestContext,
    params: PatternsParams,
) -> Result<PatternsResponse, ToolError> {
    let user = ctx.resolve_user(params.user_id.as_deref())?;
    let entries = storage.load(user.as_ref())?;

    if entries.len() < PATTERN_MIN_ENTRIES {
        let needed = PATTERN_MIN_ENTRIES - entries.len();
        return Ok(PatternsResponse {
            pattern: None,
            entries_needed: needed,
            message: format!(
                "📅 Log {} more mood{} to unlock your weekly pattern.",
                needed,
                if needed == 1 { "" } else { "s" }
            ),
        });
    }

    let pattern = day_of_week_pattern(&entries, &Local);

    let mut lines: Vec<String> = pattern
        .days
        .iter()
        .map(|d| format!("{}: {}/10 ({} entries)", weekday_name(d.weekday), d.average, d.count))
        .collect();
    if let Some(peak) = pattern.peak_day {
        lines.push(format!("🌟 Best day: {}", weekday_name(peak)));
    }
    if let Some(low) = pattern.challenging_day {
        lines.push(format!("🌧️ Most challenging day: {}", weekday_name(low)));
    }

    Ok(PatternsResponse {
        pattern: Some(pattern),
        entries_needed: 0,
        message: lines.join("\n"),
    })
}
