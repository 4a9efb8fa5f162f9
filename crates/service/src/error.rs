//! Typed error enum for the service layer.
//!
//! Only [`ServiceError::Storage`] raised while selecting a batch aborts it; every
//! other variant is recorded against a single item.

use artpaper_imaging::ImagingError;
use artpaper_storage::StorageError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::fetch::FetchError;

/// Service-layer error unifying storage, HTTP, imaging, and catalog failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store query or update failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Image download failed.
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    /// Image backend call failed.
    #[error("imaging: {0}")]
    Imaging(#[from] ImagingError),

    /// Catalog file could not be read.
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// A downloaded record's image file is not on disk.
    #[error("source image missing: {0}")]
    MissingImage(String),

    /// The store changed under us (record deleted or never downloaded).
    #[error("record {0} not in expected state: {1}")]
    UnexpectedRecordState(i64, &'static str),

    /// Local file operation failed.
    #[error("io on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying on a later run).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Fetch(e) => e.is_transient(),
            _ => false,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }
}
