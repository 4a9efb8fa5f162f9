use artpaper_core::{ArtRecord, NewArtRecord};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension as _};

use super::{format_timestamp, log_row_error, parse_timestamp, Storage};
use crate::error::StorageError;
use crate::types::{InsertOutcome, MarkOutcome, StoreCounts};

const ART_COLUMNS: &str = "art_id, url, catalog, license, artist, title, date, technique, \
     location, form, type, school, timeframe, file_name, created, modified";

impl Storage {
    /// Map a row selected with [`ART_COLUMNS`] to an [`ArtRecord`].
    ///
    /// Older databases may hold NULL metadata; those read as empty strings.
    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ArtRecord> {
        let text = |idx: usize| -> rusqlite::Result<String> {
            Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
        };
        let timestamp = |idx: usize| -> rusqlite::Result<DateTime<Utc>> {
            match row.get::<_, Option<String>>(idx)? {
                Some(raw) => parse_timestamp(idx, &raw),
                None => Ok(DateTime::<Utc>::UNIX_EPOCH),
            }
        };

        Ok(ArtRecord {
            id: row.get(0)?,
            url: row.get(1)?,
            catalog_source: text(2)?,
            license: text(3)?,
            artist: text(4)?,
            title: text(5)?,
            date: text(6)?,
            technique: text(7)?,
            location: text(8)?,
            form: text(9)?,
            art_type: text(10)?,
            school: text(11)?,
            timeframe: text(12)?,
            file_name: row.get(13)?,
            created: timestamp(14)?,
            modified: timestamp(15)?,
        })
    }

    /// Insert `record` unless a record with the same URL exists.
    ///
    /// An existing record is never modified (first write wins).
    ///
    /// # Errors
    /// Returns error if the database insert fails for any reason other than the URL conflict.
    pub fn insert_if_absent(&self, record: &NewArtRecord) -> Result<InsertOutcome, StorageError> {
        let conn = self.lock_conn()?;
        let now = format_timestamp(Utc::now());
        let changed = conn.execute(
            "INSERT INTO art
               (url, catalog, license, artist, title, date, technique, location, form, type, school, timeframe, created, modified)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
               ON CONFLICT(url) DO NOTHING",
            params![
                record.url,
                record.catalog_source,
                record.license,
                record.artist,
                record.title,
                record.date,
                record.technique,
                record.location,
                record.form,
                record.art_type,
                record.school,
                record.timeframe,
                now,
            ],
        )?;
        if changed == 0 {
            Ok(InsertOutcome::AlreadyExists)
        } else {
            Ok(InsertOutcome::Inserted(conn.last_insert_rowid()))
        }
    }

    /// Up to `limit` records without a downloaded image, in random order.
    ///
    /// Random order spreads successive batches over the whole backlog.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn select_missing_images(&self, limit: usize) -> Result<Vec<ArtRecord>, StorageError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ART_COLUMNS} FROM art WHERE file_name IS NULL ORDER BY random() LIMIT ?1"
        ))?;
        let records = stmt
            .query_map(params![limit as i64], Self::row_to_record)?
            .filter_map(log_row_error)
            .collect();
        Ok(records)
    }

    /// Up to `limit` records with a downloaded image, most recently downloaded first.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn select_recent_with_images(&self, limit: usize) -> Result<Vec<ArtRecord>, StorageError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ART_COLUMNS} FROM art WHERE file_name IS NOT NULL
               ORDER BY modified DESC, art_id DESC LIMIT ?1"
        ))?;
        let records = stmt
            .query_map(params![limit as i64], Self::row_to_record)?
            .filter_map(log_row_error)
            .collect();
        Ok(records)
    }

    /// Record that the image for `id` was saved as `file_name`.
    ///
    /// # Errors
    /// Returns error if the update fails.
    pub fn mark_downloaded(&self, id: i64, file_name: &str) -> Result<MarkOutcome, StorageError> {
        self.mark_downloaded_at(id, file_name, Utc::now())
    }

    /// [`Self::mark_downloaded`] with an explicit modification time.
    ///
    /// Only a record whose `file_name` is still NULL is updated; the check and the
    /// write happen under one lock.
    ///
    /// # Errors
    /// Returns error if the update fails.
    pub fn mark_downloaded_at(
        &self,
        id: i64,
        file_name: &str,
        at: DateTime<Utc>,
    ) -> Result<MarkOutcome, StorageError> {
        let conn = self.lock_conn()?;
        let changed = conn.execute(
            "UPDATE art SET file_name = ?1, modified = ?2 WHERE art_id = ?3 AND file_name IS NULL",
            params![file_name, format_timestamp(at), id],
        )?;
        if changed > 0 {
            return Ok(MarkOutcome::Marked);
        }

        let exists = conn
            .query_row("SELECT 1 FROM art WHERE art_id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(if exists.is_some() { MarkOutcome::AlreadyMarked } else { MarkOutcome::NotFound })
    }

    /// Get a record by id.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<ArtRecord>, StorageError> {
        let conn = self.lock_conn()?;
        let record = conn
            .query_row(
                &format!("SELECT {ART_COLUMNS} FROM art WHERE art_id = ?1"),
                params![id],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Get a record by its image URL.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn find_by_url(&self, url: &str) -> Result<Option<ArtRecord>, StorageError> {
        let conn = self.lock_conn()?;
        let record = conn
            .query_row(
                &format!("SELECT {ART_COLUMNS} FROM art WHERE url = ?1"),
                params![url],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Total and downloaded record counts.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn counts(&self) -> Result<StoreCounts, StorageError> {
        let conn = self.lock_conn()?;
        let (total, downloaded): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COUNT(file_name) FROM art",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(StoreCounts { total: total as usize, downloaded: downloaded as usize })
    }
}
