//! Shared constants for artpaper.

/// Default number of records fetched per download batch.
pub const DEFAULT_DOWNLOAD_MAX: usize = 100;

/// Default pause between two downloads, in milliseconds.
///
/// Keeps the request rate against the remote image server at roughly eight per minute.
pub const DEFAULT_DOWNLOAD_DELAY_MS: u64 = 7500;

/// Default number of records composed per wallpaper batch.
pub const DEFAULT_COMPOSE_MAX: usize = 100;

/// Upper bound for any batch size accepted from the command line.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Maximum length of a single slug component in a downloaded file name.
pub const MAX_SLUG_LEN: usize = 60;

/// Fallback extension for downloaded images whose URL carries none we recognize.
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Default HTTP timeout for a single image download, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;
