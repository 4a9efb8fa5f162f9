use std::path::Path;
use std::sync::Arc;

use artpaper_core::normalize::{normalize_artist, normalize_date, normalize_technique, normalize_title};
use artpaper_core::{CatalogField, CatalogRow, CatalogSource, NewArtRecord};
use artpaper_storage::{ArtStore, InsertOutcome};

use crate::catalog::{read_catalog, RowError};
use crate::report::{IngestReport, ItemFailure};
use crate::ServiceError;

/// Turns catalog rows into stored art records.
pub struct CatalogIngester {
    store: Arc<dyn ArtStore>,
    source: Arc<dyn CatalogSource>,
}

impl CatalogIngester {
    #[must_use]
    pub fn new(store: Arc<dyn ArtStore>, source: Arc<dyn CatalogSource>) -> Self {
        Self { store, source }
    }

    /// Reads the catalog file at `path` and ingests it.
    pub async fn ingest_catalog(&self, path: &Path) -> Result<IngestReport, ServiceError> {
        tracing::info!(catalog = self.source.name(), path = %path.display(), "Ingesting catalog");
        let rows = read_catalog(path).await?;
        self.ingest(rows).await
    }

    /// Inserts every well-formed row. Bad rows are reported and skipped; a store
    /// failure aborts the batch.
    pub async fn ingest<I>(&self, rows: I) -> Result<IngestReport, ServiceError>
    where
        I: IntoIterator<Item = Result<CatalogRow, RowError>>,
    {
        let mut report = IngestReport::default();
        for (index, row) in rows.into_iter().enumerate() {
            let record = match row.and_then(|row| self.build_record(index + 1, &row)) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(record = e.record(), error = %e, "Skipping catalog row");
                    report.failures.push(ItemFailure::new(format!("record {}", e.record()), &e));
                    continue;
                },
            };

            match self.store.insert_if_absent(&record).await? {
                InsertOutcome::Inserted(art_id) => {
                    tracing::debug!(art_id, url = %record.url, "Inserted art record");
                    report.inserted += 1;
                },
                InsertOutcome::AlreadyExists => {
                    tracing::debug!(url = %record.url, "Art record already stored");
                    report.duplicates += 1;
                },
            }
        }

        tracing::info!(
            catalog = self.source.name(),
            inserted = report.inserted,
            duplicates = report.duplicates,
            failed = report.failures.len(),
            "Catalog ingestion finished"
        );
        Ok(report)
    }

    fn build_record(&self, record: usize, row: &CatalogRow) -> Result<NewArtRecord, RowError> {
        let url = row
            .get(CatalogField::Url.column())
            .and_then(|reference| self.source.image_url(reference))
            .ok_or(RowError::MissingUrl { record })?;
        let field = |f: CatalogField| f.get_or_unknown(row).to_owned();

        Ok(NewArtRecord {
            url,
            catalog_source: self.source.name().to_owned(),
            license: self.source.license().to_owned(),
            artist: normalize_artist(CatalogField::Author.get_or_unknown(row)),
            title: normalize_title(CatalogField::Title.get_or_unknown(row)),
            date: normalize_date(CatalogField::Date.get_or_unknown(row)),
            technique: normalize_technique(CatalogField::Technique.get_or_unknown(row)),
            location: field(CatalogField::Location),
            form: field(CatalogField::Form),
            art_type: field(CatalogField::Type),
            school: field(CatalogField::School),
            timeframe: field(CatalogField::Timeframe),
        })
    }
}
