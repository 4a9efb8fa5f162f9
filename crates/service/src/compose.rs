use std::path::{Path, PathBuf};
use std::sync::Arc;

use artpaper_core::{aspect_fit, ArtRecord, Dimensions, WallpaperSize, WallpaperStyle};
use artpaper_imaging::{Annotation, ImageProcessor, ImagingError};
use artpaper_storage::ArtStore;

use crate::report::{ComposeReport, ItemFailure};
use crate::ServiceError;

/// Builds annotated wallpapers from downloaded images.
pub struct WallpaperComposer {
    store: Arc<dyn ArtStore>,
    processor: Arc<dyn ImageProcessor>,
    art_dir: PathBuf,
    wallpaper_dir: PathBuf,
}

impl WallpaperComposer {
    #[must_use]
    pub fn new(
        store: Arc<dyn ArtStore>,
        processor: Arc<dyn ImageProcessor>,
        art_dir: PathBuf,
        wallpaper_dir: PathBuf,
    ) -> Self {
        Self { store, processor, art_dir, wallpaper_dir }
    }

    /// Writes one wallpaper per size for each of the `max` most recently
    /// downloaded records. Failed pairs are reported and skipped.
    pub async fn compose(
        &self,
        max: usize,
        sizes: &[WallpaperSize],
        style: &WallpaperStyle,
    ) -> Result<ComposeReport, ServiceError> {
        let records = self.store.select_recent_with_images(max).await?;
        let mut report = ComposeReport { selected: records.len(), ..ComposeReport::default() };
        tracing::info!(count = records.len(), sizes = sizes.len(), "Composing wallpapers");

        for record in &records {
            let Some(file_name) = record.file_name.as_deref() else {
                report.failures.push(ItemFailure::new(
                    record.id.to_string(),
                    ServiceError::UnexpectedRecordState(record.id, "no downloaded image"),
                ));
                continue;
            };
            let source = self.art_dir.join(file_name);
            let source_exists = tokio::fs::try_exists(&source).await.unwrap_or(false);

            for &size in sizes {
                let output = self.wallpaper_dir.join(size.wallpaper_file_name(file_name));
                if !source_exists {
                    // Leaves any earlier wallpaper at `output` in place.
                    let e = ServiceError::MissingImage(source.display().to_string());
                    tracing::warn!(art_id = record.id, %size, error = %e, "Wallpaper composition skipped");
                    report.failures.push(ItemFailure::new(output.display().to_string(), e));
                    continue;
                }
                match self.compose_one(record, &source, &output, size, style).await {
                    Ok(()) => {
                        tracing::debug!(art_id = record.id, %size, path = %output.display(), "Wallpaper written");
                        report.created.push(output);
                    },
                    Err(e) => {
                        tracing::warn!(art_id = record.id, %size, error = %e, "Wallpaper composition failed");
                        let _ = tokio::fs::remove_file(&output).await;
                        report.failures.push(ItemFailure::new(output.display().to_string(), e));
                    },
                }
            }
        }

        tracing::info!(
            created = report.created.len(),
            failed = report.failures.len(),
            "Wallpaper composition finished"
        );
        Ok(report)
    }

    /// Canvas, composite, annotate: each step rewrites `output`, so they run in order.
    async fn compose_one(
        &self,
        record: &ArtRecord,
        source: &Path,
        output: &Path,
        size: Dimensions,
        style: &WallpaperStyle,
    ) -> Result<(), ServiceError> {
        self.processor.create_canvas(output, size, &style.background_color).await?;
        let native = self.processor.dimensions(source).await?;
        let scaled =
            aspect_fit(size, native).ok_or_else(|| ImagingError::EmptyImage(source.display().to_string()))?;
        self.processor.resize_and_composite(output, source, scaled).await?;
        self.processor.annotate(output, &Annotation::from_style(style, &record.caption_lines())).await?;
        Ok(())
    }
}
