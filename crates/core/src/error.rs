use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing domain values and loading configuration
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid wallpaper size {0:?}: expected WIDTHxHEIGHT with both sides > 0")]
    InvalidSize(String),

    #[error("invalid text position {0:?}: expected northwest, northeast, southwest or southeast")]
    InvalidPosition(String),

    #[error("no wallpaper sizes configured")]
    NoWallpaperSizes,

    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
