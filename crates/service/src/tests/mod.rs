//! Test doubles and module declarations for service tests.

#![expect(clippy::unwrap_used, reason = "test code")]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use artpaper_core::{ArtRecord, CatalogRow, Dimensions, NewArtRecord};
use artpaper_imaging::{Annotation, ImageProcessor, ImagingError};
use artpaper_storage::{ArtStore, InsertOutcome, MarkOutcome, StorageError, StoreCounts};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::time::Instant;

use crate::fetch::{FetchError, ImageSource};

/// In-memory [`ArtStore`]. Missing images are returned in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ArtRecord>>,
    /// Makes every select fail.
    pub fail_selects: AtomicBool,
    /// Makes every insert fail.
    pub fail_inserts: AtomicBool,
    /// Makes every `mark_downloaded` fail.
    pub fail_marks: AtomicBool,
    /// Deletes the record on `mark_downloaded`, as if removed mid-batch.
    pub delete_on_mark: AtomicBool,
}

impl MemoryStore {
    pub fn records(&self) -> Vec<ArtRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Inserts `record` and marks it downloaded, `age_minutes` in the past.
    pub fn add_downloaded(&self, record: &NewArtRecord, file_name: &str, age_minutes: i64) -> i64 {
        let mut records = self.records.lock().unwrap();
        let id = i64::try_from(records.len()).unwrap() + 1;
        let mut stored = to_record(id, record);
        stored.file_name = Some(file_name.to_owned());
        stored.modified = Utc::now() - Duration::minutes(age_minutes);
        records.push(stored);
        id
    }

    fn select_error() -> StorageError {
        StorageError::Task("select failed".to_owned())
    }
}

fn to_record(id: i64, record: &NewArtRecord) -> ArtRecord {
    let now = Utc::now();
    ArtRecord {
        id,
        url: record.url.clone(),
        catalog_source: record.catalog_source.clone(),
        license: record.license.clone(),
        artist: record.artist.clone(),
        title: record.title.clone(),
        date: record.date.clone(),
        technique: record.technique.clone(),
        location: record.location.clone(),
        form: record.form.clone(),
        art_type: record.art_type.clone(),
        school: record.school.clone(),
        timeframe: record.timeframe.clone(),
        file_name: None,
        created: now,
        modified: now,
    }
}

#[async_trait]
impl ArtStore for MemoryStore {
    async fn insert_if_absent(&self, record: &NewArtRecord) -> Result<InsertOutcome, StorageError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StorageError::LockPoisoned);
        }
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.url == record.url) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let id = i64::try_from(records.len()).unwrap() + 1;
        records.push(to_record(id, record));
        Ok(InsertOutcome::Inserted(id))
    }

    async fn select_missing_images(&self, limit: usize) -> Result<Vec<ArtRecord>, StorageError> {
        if self.fail_selects.load(Ordering::SeqCst) {
            return Err(Self::select_error());
        }
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|r| r.file_name.is_none()).take(limit).cloned().collect())
    }

    async fn mark_downloaded(&self, id: i64, file_name: &str) -> Result<MarkOutcome, StorageError> {
        if self.fail_marks.load(Ordering::SeqCst) {
            return Err(StorageError::Task("mark failed".to_owned()));
        }
        let mut records = self.records.lock().unwrap();
        if self.delete_on_mark.load(Ordering::SeqCst) {
            records.retain(|r| r.id != id);
        }
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(MarkOutcome::NotFound);
        };
        if record.file_name.is_some() {
            return Ok(MarkOutcome::AlreadyMarked);
        }
        record.file_name = Some(file_name.to_owned());
        record.modified = Utc::now();
        Ok(MarkOutcome::Marked)
    }

    async fn select_recent_with_images(&self, limit: usize) -> Result<Vec<ArtRecord>, StorageError> {
        if self.fail_selects.load(Ordering::SeqCst) {
            return Err(Self::select_error());
        }
        let mut recent: Vec<ArtRecord> =
            self.records.lock().unwrap().iter().filter(|r| r.file_name.is_some()).cloned().collect();
        recent.sort_by(|a, b| b.modified.cmp(&a.modified).then(b.id.cmp(&a.id)));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn counts(&self) -> Result<StoreCounts, StorageError> {
        let records = self.records.lock().unwrap();
        Ok(StoreCounts {
            total: records.len(),
            downloaded: records.iter().filter(|r| r.file_name.is_some()).count(),
        })
    }
}

/// [`ImageSource`] that writes fixed bytes and remembers when each fetch started.
#[derive(Default)]
pub struct FakeSource {
    pub fetches: Mutex<Vec<(String, Instant)>>,
    /// URLs answered with HTTP 404.
    pub not_found: HashSet<String>,
    /// URLs that write a partial body and then fail.
    pub truncated: HashSet<String>,
}

pub const FAKE_BODY: &[u8] = b"fake image bytes";

impl FakeSource {
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetches.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn fetch_times(&self) -> Vec<Instant> {
        self.fetches.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl ImageSource for FakeSource {
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        self.fetches.lock().unwrap().push((url.to_owned(), Instant::now()));
        if self.not_found.contains(url) {
            return Err(FetchError::Status { url: url.to_owned(), code: 404 });
        }
        let io_err = |source| FetchError::Io { path: dest.to_path_buf(), source };
        if self.truncated.contains(url) {
            tokio::fs::write(dest, &FAKE_BODY[..4]).await.map_err(io_err)?;
            return Err(io_err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection reset")));
        }
        tokio::fs::write(dest, FAKE_BODY).await.map_err(io_err)?;
        Ok(FAKE_BODY.len() as u64)
    }
}

/// [`ImageProcessor`] that records each call instead of touching pixels.
///
/// `create_canvas` writes an empty file so cleanup of failed outputs can be observed.
pub struct RecordingProcessor {
    pub calls: Mutex<Vec<String>>,
    pub native: Dimensions,
    /// Operation name (`canvas`, `dimensions`, `composite`, `annotate`) that fails.
    pub fail_on: Option<&'static str>,
}

impl RecordingProcessor {
    pub fn new(native: Dimensions) -> Self {
        Self { calls: Mutex::new(Vec::new()), native, fail_on: None }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str, call: String) -> Result<(), ImagingError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(op) {
            return Err(ImagingError::CommandFailed {
                program: "fake".to_owned(),
                status: "exit status: 1".to_owned(),
                stderr: format!("{op} failed"),
            });
        }
        Ok(())
    }
}

fn name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

#[async_trait]
impl ImageProcessor for RecordingProcessor {
    async fn create_canvas(&self, path: &Path, size: Dimensions, color: &str) -> Result<(), ImagingError> {
        self.record("canvas", format!("canvas {} {size} {color}", name(path)))?;
        tokio::fs::write(path, b"").await.unwrap();
        Ok(())
    }

    async fn dimensions(&self, path: &Path) -> Result<Dimensions, ImagingError> {
        self.record("dimensions", format!("dimensions {}", name(path)))?;
        Ok(self.native)
    }

    async fn resize_and_composite(
        &self,
        canvas: &Path,
        overlay: &Path,
        size: Dimensions,
    ) -> Result<(), ImagingError> {
        self.record("composite", format!("composite {} {} {size}", name(canvas), name(overlay)))
    }

    async fn annotate(&self, path: &Path, annotation: &Annotation) -> Result<(), ImagingError> {
        self.record(
            "annotate",
            format!("annotate {} {} {:?}", name(path), annotation.position, annotation.text),
        )
    }
}

pub fn create_test_record(url: &str, title: &str) -> NewArtRecord {
    NewArtRecord {
        url: url.to_owned(),
        catalog_source: "Web Gallery of Art".to_owned(),
        license: "unknown".to_owned(),
        artist: "Hans Von Aachen".to_owned(),
        title: title.to_owned(),
        date: "1598".to_owned(),
        technique: "Oil on copper".to_owned(),
        location: "Alte Pinakothek, Munich".to_owned(),
        form: "painting".to_owned(),
        art_type: "mythological".to_owned(),
        school: "German".to_owned(),
        timeframe: "1551-1600".to_owned(),
    }
}

pub fn catalog_row(pairs: &[(&str, &str)]) -> CatalogRow {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

pub fn temp_dir() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().to_path_buf();
    (dir, path)
}
