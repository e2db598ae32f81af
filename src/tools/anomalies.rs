/// Tool for reporting sudden mood drops
///
/// This module implements the mood_anomalies MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::stats::{detect_anomalies, Anomaly, ANOMALY_DROP_THRESHOLD};
use crate::storage::EntryStore;
use crate::tools::{RequestContext, ToolError};

/// Drops returned when the caller gives no limit
pub const DEFAULT_ANOMALY_LIMIT: usize = 3;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnomaliesParams {
    pub user_id: Option<String>,
    /// Maximum number of drops to return, most recent first (default 3)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AnomaliesResponse {
    pub anomalies: Vec<Anomaly>,
    /// Drops found before the limit was applied
    pub total_found: usize,
    pub message: String,
}

pub fn get_mood_anomalies<S: EntryStore>(
    storage: &S,
    ctx: &RequestContext,
    params: AnomaliesParams,
) -> Result<AnomaliesResponse, ToolError> {
    let user = ctx.resolve_user(params.user_id.as_deref())?;
    let entries = storage.load(user.as_ref())?;

    let mut anomalies = detect_anomalies(&entries);
    let total_found = anomalies.len();
    anomalies.truncate(params.limit.unwrap_or(DEFAULT_ANOMALY_LIMIT));

    let message = if anomalies.is_empty() {
        format!(
            "✅ No sudden drops of {} points or more. Your mood has been steady.",
            ANOMALY_DROP_THRESHOLD
        )
    } else {
        let lines: Vec<String> = anomalies
            .iter()
            .map(|a| {
                let note = if a.note.trim().is_empty() {
                    String::new()
                } else {
                    format!(" (\"{}\")", a.note)
                };
                format!("⚠️ {}: dropped {} points, {} → {}{}", a.date, a.drop, a.from, a.to, note)
            })
            .collect();
        format!(
            "Found {} sudden drop{}:\n{}",
            total_found,
            if total_found == 1 { "" } else { "s" },
            lines.join("\n")
        )
    };

    Ok(AnomaliesResponse {
        anomalies,
        total_found,
        message,
    })
}
