//! Image processing for artpaper
//!
//! Every operation works on a file path and overwrites it in place, so the steps
//! that build one wallpaper must run one after another.

mod error;
mod magick;
mod processor;

pub use error::ImagingError;
pub use magick::{escape_annotation_text, parse_dimensions, MagickProcessor};
pub use processor::{Annotation, ImageProcessor};
