//! Async trait implementation for SQLite `Storage` via `spawn_blocking`.

use artpaper_core::{ArtRecord, NewArtRecord};
use async_trait::async_trait;

use crate::error::StorageError;
use crate::traits::ArtStore;
use crate::types::{InsertOutcome, MarkOutcome, StoreCounts};
use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl ArtStore for Storage {
    async fn insert_if_absent(&self, record: &NewArtRecord) -> Result<InsertOutcome, StorageError> {
        delegate!(self, insert_if_absent, @ref record)
    }
    async fn select_missing_images(&self, limit: usize) -> Result<Vec<ArtRecord>, StorageError> {
        delegate!(self, select_missing_images, @val limit)
    }
    async fn mark_downloaded(&self, id: i64, file_name: &str) -> Result<MarkOutcome, StorageError> {
        delegate!(self, mark_downloaded, @val id, @str file_name)
    }
    async fn select_recent_with_images(&self, limit: usize) -> Result<Vec<ArtRecord>, StorageError> {
        delegate!(self, select_recent_with_images, @val limit)
    }
    async fn counts(&self) -> Result<StoreCounts, StorageError> {
        delegate!(self, counts)
    }
}
