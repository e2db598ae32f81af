/// MCP tools for mood tracking
///
/// This module contains all the MCP tools that external clients can call to
/// log moods and read statistics. Each tool takes its user scope and clock
/// from an explicit `RequestContext` instead of ambient state.

pub mod anomalies;
pub mod clear;
pub mod export;
pub mod insights;
pub mod log;
pub mod patterns;
pub mod stats;

// Re-export tool functions for easy access
pub use anomalies::*;
pub use clear::*;
pub use export::*;
pub use insights::*;
pub use log::*;
pub use patterns::*;
pub use stats::*;

use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;

use crate::domain::{DomainError, UserId};
use crate::insights::InsightError;
use crate::storage::StorageError;

/// Errors a tool call can end with
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Refusing to clear entries without confirm: true")]
    ConfirmationRequired,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Insight(#[from] InsightError),
}

/// Who is asking, and when
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// User scope applied when a call names no user
    pub default_user: Option<UserId>,
    /// Current local time; its date is the streak reference day
    pub now: DateTime<Local>,
}

impl RequestContext {
    pub fn new(default_user: Option<UserId>) -> Self {
        Self {
            default_user,
            now: Local::now(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Scope for a call: the `user_id` argument if given, else the default
    pub fn resolve_user(&self, user_id: Option<&str>) -> Result<Option<UserId>, ToolError> {
        match user_id {
            Some(id) => Ok(Some(UserId::new(id)?)),
            None => Ok(self.default_user.clone()),
        }
    }
}

/// Display name for a user scope in messages
pub(crate) fn scope_name(user: Option<&UserId>) -> String {
    match user {
        Some(id) => id.to_string(),
        None => "anonymous".to_string(),
    }
}
