//! Catalog file reading.

use std::path::{Path, PathBuf};

use artpaper_core::CatalogRow;
use thiserror::Error;

/// The catalog file as a whole could not be read.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid header row: {0}")]
    Header(#[source] csv::Error),
}

/// A single catalog record that cannot be ingested. Numbering starts at 1 with
/// the first record after the header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("record {record}: malformed CSV: {message}")]
    Malformed { record: usize, message: String },
    #[error("record {record}: missing or unusable URL")]
    MissingUrl { record: usize },
}

impl RowError {
    #[must_use]
    pub const fn record(&self) -> usize {
        match self {
            Self::Malformed { record, .. } | Self::MissingUrl { record } => *record,
        }
    }
}

/// Decodes ISO-8859-1 bytes. Every byte maps to the code point of the same value.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Parses catalog CSV text into one item per record.
///
/// Headers are trimmed. Records shorter than the header simply lack the trailing
/// columns.
pub fn parse_catalog(text: &str) -> Result<Vec<Result<CatalogRow, RowError>>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());
    let headers: Vec<String> =
        reader.headers().map_err(CatalogError::Header)?.iter().map(|h| h.trim().to_owned()).collect();

    let rows = reader
        .records()
        .enumerate()
        .map(|(index, result)| {
            let record = index + 1;
            result
                .map(|fields| headers.iter().cloned().zip(fields.iter().map(str::to_owned)).collect())
                .map_err(|e| RowError::Malformed { record, message: e.to_string() })
        })
        .collect();
    Ok(rows)
}

/// Reads and parses an ISO-8859-1 encoded catalog file.
pub async fn read_catalog(path: &Path) -> Result<Vec<Result<CatalogRow, RowError>>, CatalogError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read catalog file");
    parse_catalog(&decode_latin1(&bytes))
}
