/// Domain module containing core data types
///
/// This module defines the MoodEntry entity and the small value types around
/// it, along with the validation rules applied when an entry is created.

pub mod entry;
pub mod types;

// Re-export public types for easy access
pub use entry::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid mood: {0} (must be between 1 and 10)")]
    InvalidMood(i64),

    #[error("Note too long: {0} characters (max 200)")]
    NoteTooLong(usize),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(String),

    #[error("Invalid detection method: {0}")]
    InvalidDetectionMethod(String),
}
