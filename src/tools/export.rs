/// Tool for exporting mood entries
///
/// This module implements the mood_export MCP tool. Entries are returned in
/// their flat persisted JSON shape, oldest first.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::MoodEntry;
use crate::stats::chronological;
use crate::storage::EntryStore;
use crate::tools::{RequestContext, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExportParams {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub entries: Vec<MoodEntry>,
    pub count: usize,
    pub message: String,
}

pub fn export_moods<S: EntryStore>(
    storage: &S,
    ctx: &RequestContext,
    params: ExportParams,
) -> Result<ExportResponse, ToolError> {
    let user = ctx.resolve_user(params.user_id.as_deref())?;
    let loaded = storage.load(user.as_ref())?;
    let entries: Vec<MoodEntry> = chronological(&loaded).into_iter().cloned().collect();
    let count = entries.len();

    Ok(ExportResponse {
        message: format!(
            "📦 Exported {} entr{} for {}",
            count,
            if count == 1 { "y" } else { "ies" },
            crate::tools::scope_name(user.as_ref())
        ),
        entries,
        count,
    })
}
