//! Local record store.
//!
//! Durable-within-device keyed JSON storage. Single cooperative writer by
//! design; concurrent writers of the same key lose updates (documented
//! limitation, last writer wins).

mod records;
mod schema;
mod tickets;

pub use schema::*;

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// One [`IntakeRequest`](crate::models::IntakeRequest) awaiting reconciliation
    pub const PENDING_INTAKE: &str = "pendingIntake";
    /// Zero-or-one [`ActiveTicket`](crate::models::ActiveTicket)
    pub const ACTIVE_TICKET: &str = "activeTicket";
    /// Ordered [`AttendanceRecord`](crate::models::AttendanceRecord) list, newest first
    pub const ATTENDANCE_RECORDS: &str = "attendanceRecords";
    /// Append-only archive of closed tickets
    pub const FINALIZED_TICKETS: &str = "finalizedTickets";
}

/// Store errors.
///
/// Malformed persisted JSON is NOT an error: `load` absorbs it to absence so
/// a corrupt key can never crash a screen.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key/value store over a SQLite connection.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open a store at path, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Load and deserialize the value under `key`.
    ///
    /// Returns `None` for a missing key and also for a malformed value; the
    /// latter is logged and discarded rather than surfaced.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            None => Ok(None),
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::warn!(key, error = %e, "discarding malformed stored value");
                    Ok(None)
                }
            },
        }
    }

    /// Serialize and overwrite the value under `key`. Total overwrite, no
    /// merge.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            rusqlite::params![key, json],
        )?;
        Ok(())
    }

    /// Delete the value under `key`. Idempotent.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?", [key])?;
        Ok(())
    }
}
