//! Catalog sources and the columns they provide.

use std::collections::HashMap;

/// One decoded catalog row, keyed by column header.
pub type CatalogRow = HashMap<String, String>;

/// Columns read from a catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogField {
    Url,
    Author,
    Title,
    Date,
    Technique,
    Location,
    Form,
    Type,
    School,
    Timeframe,
}

impl CatalogField {
    /// Column header as it appears in the catalog file.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Author => "AUTHOR",
            Self::Title => "TITLE",
            Self::Date => "DATE",
            Self::Technique => "TECHNIQUE",
            Self::Location => "LOCATION",
            Self::Form => "FORM",
            Self::Type => "TYPE",
            Self::School => "SCHOOL",
            Self::Timeframe => "TIMEFRAME",
        }
    }

    /// Placeholder stored when the row has no such column.
    #[must_use]
    pub const fn unknown(self) -> &'static str {
        match self {
            Self::Url => "Unknown url",
            Self::Author => "Unknown artist",
            Self::Title => "Unknown title",
            Self::Date => "Unknown date",
            Self::Technique => "Unknown technique",
            Self::Location => "Unknown location",
            Self::Form => "Unknown form",
            Self::Type => "Unknown type",
            Self::School => "Unknown school",
            Self::Timeframe => "Unknown timeframe",
        }
    }

    /// Value of this column in `row`, or its placeholder when the column is absent.
    #[must_use]
    pub fn get_or_unknown(self, row: &CatalogRow) -> &str {
        row.get(self.column()).map_or(self.unknown(), String::as_str)
    }
}

/// A catalog the ingester can read.
///
/// Each source owns its provenance strings and the rule that turns the catalog's
/// reference URL into the URL of the image itself.
pub trait CatalogSource: Send + Sync {
    /// Human-readable catalog name stored on every record.
    fn name(&self) -> &str;

    /// License stored on every record.
    fn license(&self) -> &str;

    /// Catalog file location relative to the catalog directory.
    fn catalog_file(&self) -> &str;

    /// Image URL for a row's reference URL. `None` when the reference cannot be mapped.
    fn image_url(&self, reference_url: &str) -> Option<String>;
}

/// The Web Gallery of Art (wga.hu) catalog.
///
/// Its rows point at HTML pages such as `https://www.wga.hu/html/a/aachen/allegory.html`;
/// the image lives at the same path under `/art/` with a `.jpg` suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebGalleryOfArt;

impl WebGalleryOfArt {
    pub const NAME: &'static str = "Web Gallery of Art";
    pub const LICENSE: &'static str = "unknown";
    pub const CATALOG_FILE: &'static str = "web-gallery-of-art/catalog.csv";
}

impl CatalogSource for WebGalleryOfArt {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn license(&self) -> &str {
        Self::LICENSE
    }

    fn catalog_file(&self) -> &str {
        Self::CATALOG_FILE
    }

    fn image_url(&self, reference_url: &str) -> Option<String> {
        let trimmed = reference_url.trim();
        if trimmed.is_empty() {
            return None;
        }
        let art_path = trimmed.replacen("/html/", "/art/", 1);
        Some(match art_path.strip_suffix(".html") {
            Some(stem) => format!("{stem}.jpg"),
            None => art_path,
        })
    }
}
