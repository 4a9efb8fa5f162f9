//! Storage backend trait abstraction
//!
//! The async surface the pipeline services depend on. [`crate::Storage`] implements
//! it by running each call on the blocking pool; tests substitute their own.

use artpaper_core::{ArtRecord, NewArtRecord};
use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{InsertOutcome, MarkOutcome, StoreCounts};

/// Durable art record store keyed by image URL.
#[async_trait]
pub trait ArtStore: Send + Sync {
    /// Insert unless the URL is already present. Existing rows are never touched.
    async fn insert_if_absent(&self, record: &NewArtRecord) -> Result<InsertOutcome, StorageError>;

    /// Records whose image has not been downloaded, in random order.
    async fn select_missing_images(&self, limit: usize) -> Result<Vec<ArtRecord>, StorageError>;

    /// Set `file_name` and bump `modified`, only if no file name is set yet.
    async fn mark_downloaded(&self, id: i64, file_name: &str) -> Result<MarkOutcome, StorageError>;

    /// Records with a downloaded image, newest download first.
    async fn select_recent_with_images(&self, limit: usize) -> Result<Vec<ArtRecord>, StorageError>;

    /// Total and downloaded record counts.
    async fn counts(&self) -> Result<StoreCounts, StorageError>;
}
