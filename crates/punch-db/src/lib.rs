//! Storage layer for the time tracker.
//!
//! Provides persistence for tracked intervals using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! This means a `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization. The CLI opens one connection per
//! invocation and never writes concurrently.
//!
//! # Schema
//!
//! Timestamps are stored as INTEGER epoch seconds. `ended_at` is NULL while an
//! interval is still being tracked. Rows are never removed by the tracker; deleting
//! an interval sets `deleted = 1` and the reporting code skips it.

use std::path::Path;

use punch_core::{Interval, ValidationError, validate_bounds};
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// No live interval has the given ID.
    #[error("interval not found: {0}")]
    NotFound(i64),
    /// The requested change would break an interval invariant.
    #[error("invalid interval: {0}")]
    InvalidInterval(#[from] ValidationError),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

const INTERVAL_COLUMNS: &str = "id, started_at, ended_at, tag, notes, deleted";

fn interval_from_row(row: &Row<'_>) -> rusqlite::Result<Interval> {
    Ok(Interval {
        id: row.get(0)?,
        start: row.get(1)?,
        end: row.get(2)?,
        tag: row.get(3)?,
        notes: row.get(4)?,
        deleted: row.get(5)?,
    })
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- started_at / ended_at: epoch seconds; ended_at NULL while active
            CREATE TABLE IF NOT EXISTS intervals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                started_at INTEGER NOT NULL,
                ended_at INTEGER,
                tag TEXT NOT NULL,
                notes TEXT,
                deleted INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_intervals_started ON intervals(started_at);
            ",
        )?;
        Ok(())
    }

    /// Appends a new open interval and returns its ID.
    pub fn start_interval(&self, tag: &str, notes: Option<&str>, at: i64) -> Result<i64, DbError> {
        self.conn.execute(
            "INSERT INTO intervals (started_at, tag, notes) VALUES (?, ?, ?)",
            params![at, tag, notes],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, tag, at, "started interval");
        Ok(id)
    }

    /// Returns the interval currently being tracked, if any.
    pub fn active_interval(&self) -> Result<Option<Interval>, DbError> {
        let interval = self
            .conn
            .query_row(
                &format!(
                    "SELECT {INTERVAL_COLUMNS} FROM intervals
                     WHERE ended_at IS NULL AND deleted = 0
                     ORDER BY started_at DESC, id DESC
                     LIMIT 1"
                ),
                [],
                interval_from_row,
            )
            .optional()?;
        Ok(interval)
    }

    /// Returns the most recently stopped interval, if any.
    pub fn last_closed_interval(&self) -> Result<Option<Interval>, DbError> {
        let interval = self
            .conn
            .query_row(
                &format!(
                    "SELECT {INTERVAL_COLUMNS} FROM intervals
                     WHERE ended_at IS NOT NULL AND deleted = 0
                     ORDER BY ended_at DESC, id DESC
                     LIMIT 1"
                ),
                [],
                interval_from_row,
            )
            .optional()?;
        Ok(interval)
    }

    /// Fetches a single interval by ID, including soft-deleted ones.
    pub fn get_interval(&self, id: i64) -> Result<Option<Interval>, DbError> {
        let interval = self
            .conn
            .query_row(
                &format!("SELECT {INTERVAL_COLUMNS} FROM intervals WHERE id = ?"),
                params![id],
                interval_from_row,
            )
            .optional()?;
        Ok(interval)
    }

    /// Closes an interval at `at`, replacing its notes when `notes` is given.
    pub fn stop_interval(&self, id: i64, at: i64, notes: Option<&str>) -> Result<Interval, DbError> {
        let interval = self
            .get_interval(id)?
            .filter(|interval| !interval.deleted)
            .ok_or(DbError::NotFound(id))?;
        validate_bounds(interval.start, at)?;

        self.conn.execute(
            "UPDATE intervals SET ended_at = ?, notes = COALESCE(?, notes) WHERE id = ?",
            params![at, notes, id],
        )?;
        tracing::debug!(id, at, "stopped interval");
        self.get_interval(id)?.ok_or(DbError::NotFound(id))
    }

    /// Edits the tag and/or notes of a live interval.
    pub fn update_interval(
        &self,
        id: i64,
        tag: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Interval, DbError> {
        let changed = self.conn.execute(
            "UPDATE intervals
             SET tag = COALESCE(?, tag), notes = COALESCE(?, notes)
             WHERE id = ? AND deleted = 0",
            params![tag, notes, id],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(id));
        }
        tracing::debug!(id, "updated interval");
        self.get_interval(id)?.ok_or(DbError::NotFound(id))
    }

    /// Marks an interval deleted. Returns `false` if it was missing or already deleted.
    pub fn soft_delete(&self, id: i64) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE intervals SET deleted = 1 WHERE id = ? AND deleted = 0",
            params![id],
        )?;
        tracing::debug!(id, changed, "soft-deleted interval");
        Ok(changed > 0)
    }

    /// Lists every interval, soft-deleted ones included, ordered by ID.
    pub fn list_intervals(&self) -> Result<Vec<Interval>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INTERVAL_COLUMNS} FROM intervals ORDER BY id ASC"
        ))?;
        let rows = stmt.query_map([], interval_from_row)?;
        let mut intervals = Vec::new();
        for row in rows {
            intervals.push(row?);
        }
        Ok(intervals)
    }
}
