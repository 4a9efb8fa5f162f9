//! `SQLite` storage implementation.
//!
//! All methods are synchronous; [`crate::ArtStore`] wraps them for async callers.

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod art;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StorageError;
use crate::migrations;

/// Storage format for `created` / `modified`. Sorts lexicographically in time order and
/// matches SQLite's own `CURRENT_TIMESTAMP` layout, plus microseconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Parse format; `%.f` also accepts timestamps without a fractional part.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Art record store over a single `SQLite` connection.
///
/// Cloning shares the connection. Every statement runs while holding the mutex, so
/// each operation is atomic with respect to every other.
#[derive(Clone, Debug)]
pub struct Storage {
    conn: Arc<Mutex<Connection>>,
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp; RFC 3339 values written by other tools are accepted too.
pub(crate) fn parse_timestamp(column: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_PARSE_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Connection settings for a single long-lived writer.
fn init_connection(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )
}

impl Storage {
    /// Open (creating if needed) the database at `db_path` and run migrations.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created, the database cannot be
    /// opened, or a migration fails.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        let storage = Self::from_connection(conn)?;
        tracing::info!(path = %db_path.display(), "Storage initialized");
        Ok(storage)
    }

    /// Private in-memory database, mainly for tests.
    ///
    /// # Errors
    /// Returns error if migrations fail.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        init_connection(&conn)?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    pub(crate) fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Close the connection.
    ///
    /// If other clones of this handle are still alive, the connection stays open
    /// until the last one is dropped.
    ///
    /// # Errors
    /// Returns error if `SQLite` refuses to close (e.g. unfinalized statements).
    pub fn close(self) -> Result<(), StorageError> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex.into_inner().map_err(|_| StorageError::LockPoisoned)?;
                conn.close().map_err(|(_, e)| StorageError::Database(e))?;
                tracing::info!("Disconnected from the art database");
                Ok(())
            },
            Err(_) => {
                tracing::debug!("Storage still shared, connection closes with the last handle");
                Ok(())
            },
        }
    }
}
