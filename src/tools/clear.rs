/// Tool for clearing a user's history
///
/// This module implements the mood_clear MCP tool. Clearing removes every
/// entry in the scope and needs an explicit confirmation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::EntryStore;
use crate::tools::{RequestContext, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClearParams {
    pub user_id: Option<String>,
    /// Must be true; nothing is removed otherwise
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub removed: usize,
    pub message: String,
}

pub fn clear_moods<S: EntryStore>(
    storage: &S,
    ctx: &RequestContext,
    params: ClearParams,
) -> Result<ClearResponse, ToolError> {
    if !params.confirm {
        return Err(ToolError::ConfirmationRequired);
    }

    let user = ctx.resolve_user(params.user_id.as_deref())?;
    let removed = storage.clear_all(user.as_ref())?;
    let scope = crate::tools::scope_name(user.as_ref());
    tracing::info!("Cleared {} entries for {}", removed, scope);

    Ok(ClearResponse {
        success: true,
        removed,
        message: format!(
            "🧹 Removed {} entr{} for {}",
            removed,
            if removed == 1 { "y" } else { "ies" },
            scope
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::*;

    #[test]
    fn test_requires_confirmation() {
        let storage = seeded_store(None, &[5, 5]);
        let result = clear_moods(&storage, &context(None), ClearParams { user_id: None, confirm: false });

        assert!(matches!(result, Err(ToolError::ConfirmationRequired)));
        assert_eq!(storage.load(None).unwrap().len(), 2);
    }

    #[test]
    fn test_clears_only_the_scope() {
        let storage = seeded_store(Some("user_1"), &[5, 5, 5]);
        let ctx = context(Some("user_1"));

        let response = clear_moods(
            &storage,
            &ctx,
            ClearParams { user_id: Some("user_2".to_string()), confirm: true },
        )
        .unwrap();
        assert_eq!(response.removed, 0);

        let response = clear_moods(&storage, &ctx, ClearParams { user_id: None, confirm: true }).unwrap();
        assert_eq!(response.removed, 3);
        assert!(storage.load(ctx.default_user.as_ref()).unwrap().is_empty());
    }
}
