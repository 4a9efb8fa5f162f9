use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use artpaper_core::{image_file_name, ArtRecord};
use artpaper_storage::{ArtStore, MarkOutcome};

use crate::fetch::ImageSource;
use crate::report::{DownloadReport, ItemFailure};
use crate::ServiceError;

/// Fetches images for records that have none, one at a time.
pub struct Downloader {
    store: Arc<dyn ArtStore>,
    source: Arc<dyn ImageSource>,
    art_dir: PathBuf,
}

/// What happened to one record that did not fail.
enum Downloaded {
    Marked(u64),
    AlreadyMarked(u64),
}

impl Downloader {
    #[must_use]
    pub fn new(store: Arc<dyn ArtStore>, source: Arc<dyn ImageSource>, art_dir: PathBuf) -> Self {
        Self { store, source, art_dir }
    }

    /// Downloads up to `max` missing images, pausing `delay` between records.
    ///
    /// The pause follows every record except the last, whether or not it succeeded.
    /// Only a failure to select the batch is returned as an error.
    pub async fn download(&self, max: usize, delay: Duration) -> Result<DownloadReport, ServiceError> {
        let records = self.store.select_missing_images(max).await?;
        let mut report = DownloadReport { selected: records.len(), ..DownloadReport::default() };
        tracing::info!(count = records.len(), ?delay, "Downloading images");

        for (index, record) in records.iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.download_one(record).await {
                Ok(Downloaded::Marked(bytes)) => {
                    report.downloaded += 1;
                    report.bytes += bytes;
                },
                Ok(Downloaded::AlreadyMarked(bytes)) => {
                    report.already_marked += 1;
                    report.bytes += bytes;
                },
                Err(e) => {
                    tracing::warn!(art_id = record.id, url = %record.url, error = %e, "Image download failed");
                    report.failures.push(ItemFailure::new(record.id.to_string(), e));
                },
            }
        }

        tracing::info!(
            downloaded = report.downloaded,
            already_marked = report.already_marked,
            failed = report.failures.len(),
            "Image download finished"
        );
        Ok(report)
    }

    async fn download_one(&self, record: &ArtRecord) -> Result<Downloaded, ServiceError> {
        let file_name = image_file_name(record);
        let final_path = self.art_dir.join(&file_name);
        let part_path = self.art_dir.join(format!("{file_name}.part"));

        let bytes = match self.fetch_and_rename(&record.url, &part_path, &final_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = tokio::fs::remove_file(&part_path).await;
                return Err(e);
            },
        };
        tracing::debug!(art_id = record.id, file_name = %file_name, bytes, "Image written");

        match self.store.mark_downloaded(record.id, &file_name).await? {
            MarkOutcome::Marked => Ok(Downloaded::Marked(bytes)),
            MarkOutcome::AlreadyMarked => {
                tracing::debug!(art_id = record.id, "Record was marked by another run");
                Ok(Downloaded::AlreadyMarked(bytes))
            },
            MarkOutcome::NotFound => {
                let _ = tokio::fs::remove_file(&final_path).await;
                Err(ServiceError::UnexpectedRecordState(record.id, "deleted during download"))
            },
        }
    }

    async fn fetch_and_rename(&self, url: &str, part_path: &Path, final_path: &Path) -> Result<u64, ServiceError> {
        let bytes = self.source.fetch_to(url, part_path).await?;
        tokio::fs::rename(part_path, final_path).await.map_err(|e| ServiceError::io(final_path, e))?;
        Ok(bytes)
    }
}
