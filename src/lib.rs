/// Public library interface for the Mood Tracker MCP server
///
/// This module exports the main server implementation and public types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod insights;
mod mcp;
mod stats;
mod storage;
mod tools;

// Re-export public modules and types
pub use domain::*;
pub use insights::{
    Insight, InsightCache, InsightError, InsightKind, InsightProvider, InsightRequest,
    InsightService, RateLimitGate, RetryPolicy, RuleBasedProvider, DEFAULT_INSIGHT_CACHE_CAPACITY,
    DEFAULT_INSIGHT_TTL,
};
pub use mcp::McpServer;
pub use stats::*;
pub use storage::{EntryStore, SqliteStorage, StorageError};
pub use tools::{
    clear_moods, export_moods, get_mood_anomalies, get_mood_insights, get_mood_patterns,
    get_mood_stats, log_mood, AnomaliesParams, ClearParams, ExportParams, InsightsParams,
    LogMoodParams, PatternsParams, RequestContext, StatsParams, ToolError,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main mood tracker server that implements the MCP protocol
///
/// This server keeps mood entries in a SQLite database and owns the insight
/// service (provider, cache and rate-limit state) that the insight tool
/// goes through.
pub struct MoodTrackerServer {
    storage: SqliteStorage,
    insights: InsightService,
    default_user: Option<UserId>,
}

impl MoodTrackerServer {
    /// Create a new mood tracker server with the specified database path
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Mood Tracker server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        Ok(Self::with_storage(storage))
    }

    /// Server over an already opened store, anonymous by default
    pub fn with_storage(storage: SqliteStorage) -> Self {
        Self {
            storage,
            insights: InsightService::new(Box::new(RuleBasedProvider::new()), DEFAULT_INSIGHT_TTL),
            default_user: None,
        }
    }

    /// Scope tool calls that name no user to `user`
    pub fn with_default_user(mut self, user: Option<UserId>) -> Self {
        self.default_user = user;
        self
    }

    pub fn with_insight_service(mut self, insights: InsightService) -> Self {
        self.insights = insights;
        self
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until the server is shut down or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Test database connectivity
        let entries = self.storage.load(self.default_user.as_ref())?;
        tracing::info!(
            "Server started successfully, found {} existing entries for {}",
            entries.len(),
            tools::scope_name(self.default_user.as_ref())
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Context for one tool call, stamped with the current time
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.default_user.clone())
    }

    pub fn default_user(&self) -> Option<&UserId> {
        self.default_user.as_ref()
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Storage alongside the insight service, borrowed together
    pub fn parts_mut(&mut self) -> (&SqliteStorage, &mut InsightService) {
        (&self.storage, &mut self.insights)
    }
}
