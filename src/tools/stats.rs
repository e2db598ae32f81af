/// Tool for the mood dashboard
///
/// This module implements the mood_stats MCP tool: the headline summary,
/// the bucket distribution, the low-mood alert and milestone progress.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::MoodLevel;
use crate::stats::{
    distribution, milestones, AverageTier, Milestone, MoodBucket, MoodDistribution, MoodSummary,
    DEFAULT_DISTRIBUTION_WINDOW,
};
use crate::storage::EntryStore;
use crate::tools::{RequestContext, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatsParams {
    /// User to report on; defaults to the server's user
    pub user_id: Option<String>,
    /// Trailing entries counted in the distribution (default 30)
    pub window: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub summary: MoodSummary,
    pub distribution: MoodDistribution,
    pub low_mood_alert: bool,
    pub tier: AverageTier,
    pub milestones: Vec<Milestone>,
    pub message: String,
}

pub fn get_mood_stats<S: EntryStore>(
    storage: &S,
    ctx: &RequestContext,
    params: StatsParams,
) -> Result<StatsResponse, ToolError> {
    let window = params.window.unwrap_or(DEFAULT_DISTRIBUTION_WINDOW);
    if window == 0 {
        return Err(ToolError::InvalidParams("window must be at least 1".to_string()));
    }

    let user = ctx.resolve_user(params.user_id.as_deref())?;
    let entries = storage.load(user.as_ref())?;

    let summary = MoodSummary::compute(&entries, ctx.today());
    let distribution = distribution(&entries, window);
    let low_mood_alert = summary.low_mood_alert();
    let tier = summary.tier();
    let milestones = milestones(summary.streak, summary.total);

    let message = if summary.total == 0 {
        format!("📊 No moods logged yet. {}", tier.message())
    } else {
        let level = MoodLevel::for_score(summary.average);
        let mut lines = vec![
            format!(
                "📊 7-day average: {}/10 {} ({})",
                summary.average, level.emoji, level.label
            ),
            format!(
                "🔥 Streak: {} day{} | Total entries: {}",
                summary.streak,
                if summary.streak == 1 { "" } else { "s" },
                summary.total
            ),
        ];
        if let Some(today) = summary.today_mood {
            lines.push(format!("📅 Today: {}/10", today));
        }
        lines.push(format!(
            "🎨 {} {:.1}% | {} {:.1}% | {} {:.1}%",
            MoodBucket::Great.display_name(),
            distribution.shares.great,
            MoodBucket::Good.display_name(),
            distribution.shares.good,
            MoodBucket::Low.display_name(),
            distribution.shares.low
        ));
        lines.push(tier.message().to_string());
        if low_mood_alert {
            lines.push(
                "🚨 Your last few entries have been consistently low. Please consider reaching out for support."
                    .to_string(),
            );
        }
        lines.join("\n")
    };

    Ok(StatsResponse {
        summary,
        distribution,
        low_mood_alert,
        tier,
        milestones,
        message,
    })
}
