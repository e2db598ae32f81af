/// Tool for wellbeing recommendations and improvement plans
///
/// This module implements the mood_insights MCP tool. Text comes from the
/// configured insight provider, behind the service's cache and retry policy.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::insights::{InsightKind, InsightRequest, InsightService};
use crate::stats::{rolling_average, select_recent, DEFAULT_RECENT_COUNT, DEFAULT_ROLLING_WINDOW};
use crate::storage::EntryStore;
use crate::tools::{RequestContext, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InsightsParams {
    pub user_id: Option<String>,
    /// "recommendations" (default) or "plan"
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub kind: InsightKind,
    pub average: f64,
    /// Whether the text was served from the cache
    pub cached: bool,
    pub message: String,
}

pub async fn get_mood_insights<S: EntryStore>(
    storage: &S,
    service: &mut InsightService,
    ctx: &RequestContext,
    params: InsightsParams,
) -> Result<InsightsResponse, ToolError> {
    let kind = match params.kind.as_deref() {
        Some(name) => InsightKind::from_name(name).ok_or_else(|| {
            ToolError::InvalidParams(format!(
                "Unknown insight kind '{}' (expected 'recommendations' or 'plan')",
                name
            ))
        })?,
        None => InsightKind::Recommendations,
    };

    let user = ctx.resolve_user(params.user_id.as_deref())?;
    let entries = storage.load(user.as_ref())?;
    let average = rolling_average(&entries, DEFAULT_ROLLING_WINDOW);

    let request = match kind {
        InsightKind::Recommendations => {
            InsightRequest::recommendations(average, select_recent(&entries, DEFAULT_RECENT_COUNT))
        }
        InsightKind::ImprovementPlan => InsightRequest::improvement_plan(average, entries)?,
    }
    .for_user(user.clone());

    let insight = service.get(&request).await?;
    tracing::debug!(
        "Served {:?} insight for {} (cached: {})",
        kind,
        crate::tools::scope_name(user.as_ref()),
        insight.cached
    );

    Ok(InsightsResponse {
        kind,
        average,
        cached: insight.cached,
        message: insight.text,
    })
}
