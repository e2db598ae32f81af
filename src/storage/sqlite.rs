/// SQLite implementation of the entry store
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving mood entries. It handles all SQL queries and data conversion.

use std::path::PathBuf;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::domain::{DetectionMethod, EntryId, MoodEntry, UserId, MAX_MOOD, MIN_MOOD};
use crate::storage::{migrations, EntryStore, StorageError};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// the operations defined in the EntryStore trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }
}

/// Raw `mood_entries` columns, decoded into an entry after the query
struct StoredRow {
    id: String,
    user_id: Option<String>,
    date: String,
    mood: i64,
    note: String,
    timestamp: i64,
    detection_method: Option<String>,
}

fn invalid(column: &str, message: impl ToString) -> StorageError {
    StorageError::InvalidRecord {
        column: column.to_string(),
        message: message.to_string(),
    }
}

impl StoredRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: row.get(2)?,
            mood: row.get(3)?,
            note: row.get(4)?,
            timestamp: row.get(5)?,
            detection_method: row.get(6)?,
        })
    }

    fn into_entry(self) -> Result<MoodEntry, StorageError> {
        let id = EntryId::from_string(&self.id).map_err(|e| invalid("id", e))?;
        let user_id = self
            .user_id
            .map(UserId::new)
            .transpose()
            .map_err(|e| invalid("user_id", e))?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| invalid("date", format!("'{}': {}", self.date, e)))?;
        let mood = u8::try_from(self.mood)
            .ok()
            .filter(|m| (MIN_MOOD..=MAX_MOOD).contains(m))
            .ok_or_else(|| invalid("mood", format!("{} is outside {}..={}", self.mood, MIN_MOOD, MAX_MOOD)))?;
        let detection_method = self
            .detection_method
            .map(|tag| DetectionMethod::from_tag(&tag))
            .transpose()
            .map_err(|e| invalid("detection_method", e))?;

        Ok(MoodEntry::from_existing(
            id,
            date,
            mood,
            self.note,
            self.timestamp,
            detection_method,
            user_id,
        ))
    }
}

impl EntryStore for SqliteStorage {
    fn load(&self, user: Option<&UserId>) -> Result<Vec<MoodEntry>, StorageError> {
        // `IS` matches NULL for the anonymous scope
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, date, mood, note, timestamp, detection_method
             FROM mood_entries WHERE user_id IS ?1
             ORDER BY timestamp, rowid",
        )?;

        let rows = stmt.query_map(params![user.map(UserId::as_str)], StoredRow::read)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry()?);
        }

        tracing::debug!("Loaded {} entries for user {:?}", entries.len(), user.map(UserId::as_str));
        Ok(entries)
    }

    fn append(&self, entry: &MoodEntry) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO mood_entries (
                id, user_id, date, mood, note, timestamp, detection_method
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id.to_string(),
                entry.user_id.as_ref().map(UserId::as_str),
                entry.date.format("%Y-%m-%d").to_string(),
                entry.mood,
                entry.note,
                entry.timestamp,
                entry.detection_method.map(|m| m.as_tag()),
            ],
        )?;

        tracing::debug!("Appended mood entry: {} ({}/10 on {})", entry.id, entry.mood, entry.date);
        Ok(())
    }

    fn clear_all(&self, user: Option<&UserId>) -> Result<usize, StorageError> {
        let removed = self.conn.execute(
            "DELETE FROM mood_entries WHERE user_id IS ?1",
            params![user.map(UserId::as_str)],
        )?;

        tracing::info!("Cleared {} entries for user {:?}", removed, user.map(UserId::as_str));
        Ok(removed)
    }
}
