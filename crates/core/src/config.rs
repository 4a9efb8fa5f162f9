//! Application configuration.
//!
//! Resolution order: built-in defaults, then an optional JSON file, then
//! `ARTPAPER_*` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::env_config::{env_non_empty, env_parse_with_default};
use crate::error::{CoreError, Result};
use crate::wallpaper::{parse_size_list, Dimensions, TextPosition, WallpaperSize, WallpaperStyle};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "ARTPAPER_CONFIG";

/// Directory, database, and wallpaper settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root under which catalog files live.
    pub catalog_dir: PathBuf,
    /// Where downloaded images are written.
    pub art_dir: PathBuf,
    /// Where composed wallpapers are written.
    pub wallpaper_dir: PathBuf,
    pub database_file: PathBuf,
    pub wallpaper_sizes: Vec<WallpaperSize>,
    pub style: WallpaperStyle,
    /// ImageMagick entry point: `convert` (IM6) or `magick` (IM7).
    pub magick_program: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_base_dir(&Self::default_base_dir())
    }
}

impl AppConfig {
    /// `<local data dir>/artpaper`, or `./artpaper` when the platform has none.
    #[must_use]
    pub fn default_base_dir() -> PathBuf {
        dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("artpaper")
    }

    /// Default configuration with every path under `base`.
    #[must_use]
    pub fn with_base_dir(base: &Path) -> Self {
        Self {
            catalog_dir: base.join("catalogs"),
            art_dir: base.join("art"),
            wallpaper_dir: base.join("wallpapers"),
            database_file: base.join("art-gallery.db"),
            wallpaper_sizes: vec![Dimensions::new(1920, 1080), Dimensions::new(2560, 1440)],
            style: WallpaperStyle {
                position: TextPosition::SouthEast,
                offset_px: 50,
                ..WallpaperStyle::default()
            },
            magick_program: "convert".to_owned(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: concat!("artpaper/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| CoreError::ConfigRead { path: path.to_owned(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| CoreError::ConfigParse { path: path.to_owned(), source })
    }

    /// Full resolution: `explicit` file (or `ARTPAPER_CONFIG`), then env overrides.
    ///
    /// # Errors
    /// Returns an error if a named config file cannot be loaded or the result is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = explicit.map(Path::to_path_buf).or_else(|| env_non_empty(CONFIG_ENV_VAR).map(PathBuf::from));
        let base = match file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::from_json_file(&path)?
            },
            None => Self::default(),
        };
        let config = base.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Applies `ARTPAPER_*` environment overrides.
    #[must_use]
    pub fn apply_env(mut self) -> Self {
        if let Some(v) = env_non_empty("ARTPAPER_CATALOG_DIR") {
            self.catalog_dir = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty("ARTPAPER_ART_DIR") {
            self.art_dir = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty("ARTPAPER_WALLPAPER_DIR") {
            self.wallpaper_dir = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty("ARTPAPER_DATABASE") {
            self.database_file = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty("ARTPAPER_WALLPAPER_SIZES") {
            match parse_size_list(&v) {
                Ok(sizes) if !sizes.is_empty() => self.wallpaper_sizes = sizes,
                Ok(_) => tracing::warn!(value = %v, "ARTPAPER_WALLPAPER_SIZES is empty, keeping configured sizes"),
                Err(e) => tracing::warn!(value = %v, error = %e, "invalid ARTPAPER_WALLPAPER_SIZES, keeping configured sizes"),
            }
        }
        if let Some(v) = env_non_empty("ARTPAPER_MAGICK") {
            self.magick_program = v;
        }
        self.http_timeout_secs = env_parse_with_default("ARTPAPER_HTTP_TIMEOUT_SECS", self.http_timeout_secs);
        self
    }

    /// Rejects configurations no command can run with.
    ///
    /// # Errors
    /// Returns an error if no sizes are configured or a size has a zero side.
    pub fn validate(&self) -> Result<()> {
        if self.wallpaper_sizes.is_empty() {
            return Err(CoreError::NoWallpaperSizes);
        }
        if let Some(bad) = self.wallpaper_sizes.iter().find(|s| !s.is_valid()) {
            return Err(CoreError::InvalidSize(bad.to_string()));
        }
        Ok(())
    }

    /// Path of the catalog file for a source whose file is `relative` to the catalog dir.
    #[must_use]
    pub fn catalog_path(&self, relative: &str) -> PathBuf {
        self.catalog_dir.join(relative)
    }
}
