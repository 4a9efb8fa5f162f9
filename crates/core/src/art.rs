//! Persisted art records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogued piece of art as stored in the `art` table.
///
/// Metadata is immutable after insert. `file_name` is the only mutable field and
/// moves from `None` to `Some` exactly once, when the image has been downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtRecord {
    /// Store-assigned primary key
    pub id: i64,
    /// Canonical image URL, unique across the store
    pub url: String,
    /// Name of the catalog this record came from
    pub catalog_source: String,
    pub license: String,
    pub artist: String,
    pub title: String,
    pub date: String,
    pub technique: String,
    pub location: String,
    pub form: String,
    #[serde(rename = "type")]
    pub art_type: String,
    pub school: String,
    pub timeframe: String,
    /// Local image file name, relative to the art directory
    pub file_name: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ArtRecord {
    /// Lines of text annotated onto a wallpaper, in display order.
    #[must_use]
    pub fn caption_lines(&self) -> [&str; 5] {
        [&self.title, &self.artist, &self.date, &self.technique, &self.location]
    }
}

/// Insert payload for a new [`ArtRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArtRecord {
    pub url: String,
    pub catalog_source: String,
    pub license: String,
    pub artist: String,
    pub title: String,
    pub date: String,
    pub technique: String,
    pub location: String,
    pub form: String,
    #[serde(rename = "type")]
    pub art_type: String,
    pub school: String,
    pub timeframe: String,
}
