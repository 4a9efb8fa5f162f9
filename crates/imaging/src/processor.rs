use std::path::Path;

use artpaper_core::{Dimensions, TextPosition, WallpaperStyle};
use async_trait::async_trait;

use crate::ImagingError;

/// Text drawn onto an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub position: TextPosition,
    pub fill_color: String,
    pub outline_color: Option<String>,
    pub font_family: String,
    pub point_size: u32,
    /// Inward offset from both edges of the corner, in pixels.
    pub offset_px: u32,
    pub text: String,
}

impl Annotation {
    /// Annotation for `lines` (joined with newlines) drawn in `style`.
    #[must_use]
    pub fn from_style(style: &WallpaperStyle, lines: &[&str]) -> Self {
        Self {
            position: style.position,
            fill_color: style.fill_color.clone(),
            outline_color: style.outline_color.clone(),
            font_family: style.font_family.clone(),
            point_size: style.point_size,
            offset_px: style.offset_px,
            text: lines.join("\n"),
        }
    }
}

/// Image primitive used for wallpaper composition.
///
/// Each call is atomic from the caller's point of view: it either rewrites the
/// target file or fails.
#[async_trait]
pub trait ImageProcessor: Send + Sync {
    /// Write a solid `color` image of exactly `size` to `path`.
    async fn create_canvas(&self, path: &Path, size: Dimensions, color: &str) -> Result<(), ImagingError>;

    /// Native size of the image at `path`.
    async fn dimensions(&self, path: &Path) -> Result<Dimensions, ImagingError>;

    /// Resize `overlay` to `size` and composite it centered onto `canvas`, in place.
    async fn resize_and_composite(
        &self,
        canvas: &Path,
        overlay: &Path,
        size: Dimensions,
    ) -> Result<(), ImagingError>;

    /// Draw `annotation` onto the image at `path`, in place.
    async fn annotate(&self, path: &Path, annotation: &Annotation) -> Result<(), ImagingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_from_style_joins_lines() {
        let style = WallpaperStyle::default();
        let annotation = Annotation::from_style(&style, &["Allegory", "Hans Von Aachen", "1598"]);
        assert_eq!(annotation.text, "Allegory\nHans Von Aachen\n1598");
        assert_eq!(annotation.position, TextPosition::NorthEast);
        assert_eq!(annotation.offset_px, 25);
        assert_eq!(annotation.outline_color.as_deref(), Some("black"));
    }
}
