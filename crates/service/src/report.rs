//! Batch outcome reports.
//!
//! Each pipeline returns one report per run. Per-item failures are collected
//! rather than raised so a batch always runs to completion.

use std::path::PathBuf;

use serde::Serialize;

/// A single item that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    /// What failed: a catalog record number, an art id, or an output path.
    pub item: String,
    pub reason: String,
}

impl ItemFailure {
    pub fn new(item: impl Into<String>, reason: impl ToString) -> Self {
        Self { item: item.into(), reason: reason.to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Rows written as new records.
    pub inserted: usize,
    /// Rows whose URL was already stored.
    pub duplicates: usize,
    pub failures: Vec<ItemFailure>,
}

impl IngestReport {
    /// Rows accepted by the store, new or already present.
    #[must_use]
    pub const fn ingested(&self) -> usize {
        self.inserted + self.duplicates
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadReport {
    /// Records selected for this batch.
    pub selected: usize,
    /// Images fetched and recorded.
    pub downloaded: usize,
    /// Images fetched for records another run had already marked.
    pub already_marked: usize,
    /// Bytes written across all successful downloads.
    pub bytes: u64,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeReport {
    /// Records selected for this batch.
    pub selected: usize,
    /// Wallpapers written.
    pub created: Vec<PathBuf>,
    pub failures: Vec<ItemFailure>,
}
