pub(crate) mod download;
pub(crate) mod ingest;
pub(crate) mod status;
pub(crate) mod wallpapers;

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};
use artpaper_core::{AppConfig, MAX_BATCH_SIZE};
use artpaper_service::ServiceError;
use artpaper_storage::Storage;
use serde::Serialize;

pub(crate) fn open_store(config: &AppConfig) -> Result<Storage> {
    let db_path = &config.database_file;
    Storage::new(db_path).with_context(|| format!("failed to open database {}", db_path.display()))
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create directory {}", dir.display()))
}

pub(crate) fn clamp_batch(max: usize) -> usize {
    if max > MAX_BATCH_SIZE {
        tracing::warn!(requested = max, limit = MAX_BATCH_SIZE, "Batch size capped");
    }
    max.min(MAX_BATCH_SIZE)
}

/// Runs `batch` until it finishes or Ctrl-C arrives, whichever is first.
///
/// On interrupt the batch future is dropped at its current await point.
pub(crate) async fn interruptible<T>(batch: impl Future<Output = Result<T, ServiceError>>) -> Result<T> {
    tokio::select! {
        result = batch => Ok(result?),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, stopping batch");
            Err(anyhow::anyhow!("interrupted"))
        },
    }
}

/// Closes the store after a batch, then yields the batch result.
pub(crate) fn finish<T>(storage: Storage, result: Result<T>) -> Result<T> {
    if let Err(e) = storage.close() {
        tracing::warn!(error = %e, "Failed to close database");
    }
    result
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
