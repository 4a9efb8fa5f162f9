//! Service layer for artpaper
//!
//! The three batch pipelines (catalog ingestion, image download, wallpaper
//! composition) built on the store, HTTP, and imaging seams.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Services hold trait objects")]
#![allow(clippy::let_underscore_must_use, reason = "Best-effort cleanup of temporary files")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod catalog;
mod compose;
mod download;
mod error;
mod fetch;
mod ingest;
mod report;
#[cfg(test)]
mod tests;

pub use catalog::{decode_latin1, parse_catalog, read_catalog, CatalogError, RowError};
pub use compose::WallpaperComposer;
pub use download::Downloader;
pub use error::ServiceError;
pub use fetch::{FetchError, HttpImageSource, ImageSource};
pub use ingest::CatalogIngester;
pub use report::{ComposeReport, DownloadReport, IngestReport, ItemFailure};
