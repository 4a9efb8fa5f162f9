//! Wallpaper geometry and styling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both sides are non-zero.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Output file name for a wallpaper of this size built from `art_file_name`.
    #[must_use]
    pub fn wallpaper_file_name(&self, art_file_name: &str) -> String {
        format!("{self}-{art_file_name}")
    }
}

/// A configured wallpaper output size.
pub type WallpaperSize = Dimensions;

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = CoreError;

    /// Parses `"1920x1080"` (an upper-case `X` is accepted too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidSize(s.to_owned());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        let dims = Self::new(width, height);
        if dims.is_valid() { Ok(dims) } else { Err(invalid()) }
    }
}

/// Parses a comma-separated list such as `"1920x1080,2560x1440"`.
///
/// # Errors
/// Returns [`CoreError::InvalidSize`] for the first entry that does not parse.
pub fn parse_size_list(s: &str) -> Result<Vec<Dimensions>, CoreError> {
    s.split(',').filter(|part| !part.trim().is_empty()).map(str::parse).collect()
}

/// Size to scale an `image` to so that it fits entirely inside `canvas`.
///
/// When the image is relatively wider than the canvas it is fit to the canvas width,
/// otherwise to the canvas height; at equal aspect ratios both rules agree. The other
/// side is rounded down, so the result never exceeds the canvas and nothing is cropped.
/// Returns `None` if either input has a zero side.
#[must_use]
pub fn aspect_fit(canvas: Dimensions, image: Dimensions) -> Option<Dimensions> {
    if !canvas.is_valid() || !image.is_valid() {
        return None;
    }

    let (cw, ch) = (u64::from(canvas.width), u64::from(canvas.height));
    let (iw, ih) = (u64::from(image.width), u64::from(image.height));

    // iw / ih > cw / ch, compared without floating point.
    let scaled = if iw * ch > cw * ih {
        Dimensions::new(canvas.width, clamp_side(ih * cw / iw, canvas.height))
    } else {
        Dimensions::new(clamp_side(iw * ch / ih, canvas.width), canvas.height)
    };
    Some(scaled)
}

fn clamp_side(value: u64, bound: u32) -> u32 {
    u32::try_from(value).unwrap_or(bound).clamp(1, bound)
}

/// Corner of the wallpaper that metadata text is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    NorthWest,
    #[default]
    NorthEast,
    SouthWest,
    SouthEast,
}

impl TextPosition {
    /// ImageMagick gravity name for this corner.
    #[must_use]
    pub const fn as_gravity(self) -> &'static str {
        match self {
            Self::NorthWest => "northwest",
            Self::NorthEast => "northeast",
            Self::SouthWest => "southwest",
            Self::SouthEast => "southeast",
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_gravity())
    }
}

impl FromStr for TextPosition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "northwest" => Ok(Self::NorthWest),
            "northeast" => Ok(Self::NorthEast),
            "southwest" => Ok(Self::SouthWest),
            "southeast" => Ok(Self::SouthEast),
            _ => Err(CoreError::InvalidPosition(s.to_owned())),
        }
    }
}

/// Look of a composed wallpaper.
///
/// Colors are anything the image backend understands (`black`, `#202020`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallpaperStyle {
    /// Canvas color around the art. Default `black`.
    pub background_color: String,
    /// Text color. Default `white`.
    pub fill_color: String,
    /// Text outline color; `None` draws no outline. Default `black`.
    pub outline_color: Option<String>,
    /// Default `Ubuntu`.
    pub font_family: String,
    /// Default 28.
    pub point_size: u32,
    /// Default north-east.
    pub position: TextPosition,
    /// Distance of the text from both edges of its corner, in pixels. Default 25.
    pub offset_px: u32,
}

impl Default for WallpaperStyle {
    fn default() -> Self {
        Self {
            background_color: "black".to_owned(),
            fill_color: "white".to_owned(),
            outline_color: Some("black".to_owned()),
            font_family: "Ubuntu".to_owned(),
            point_size: 28,
            position: TextPosition::NorthEast,
            offset_px: 25,
        }
    }
}
