/// Storage layer for persisting mood entries
///
/// This module handles all database operations using SQLite. It provides
/// a narrow, append-only interface scoped per user identity.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{MoodEntry, UserId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Invalid stored record in column {column}: {message}")]
    InvalidRecord { column: String, message: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for mood entries
///
/// `user` is always explicit: `Some` selects one user's entries and `None`
/// selects the anonymous ones. Implementations make no promise about the
/// order `load` returns; the statistics engine sorts for itself.
pub trait EntryStore {
    /// Load every entry in a user scope
    fn load(&self, user: Option<&UserId>) -> Result<Vec<MoodEntry>, StorageError>;

    /// Append one entry
    fn append(&self, entry: &MoodEntry) -> Result<(), StorageError>;

    /// Remove every entry in a user scope, returning how many were removed
    fn clear_all(&self, user: Option<&UserId>) -> Result<usize, StorageError>;
}
