use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use artpaper_core::AppConfig;
use artpaper_service::{Downloader, HttpImageSource};

use super::{clamp_batch, ensure_dir, finish, interruptible, open_store, print_json};

pub(crate) async fn run_download(config: &AppConfig, max: usize, delay_ms: u64) -> Result<()> {
    ensure_dir(&config.art_dir)?;
    let source = HttpImageSource::new(Duration::from_secs(config.http_timeout_secs), &config.user_agent)
        .context("failed to build HTTP client")?;
    let storage = open_store(config)?;

    let result = {
        let downloader = Downloader::new(Arc::new(storage.clone()), Arc::new(source), config.art_dir.clone());
        interruptible(downloader.download(clamp_batch(max), Duration::from_millis(delay_ms))).await
    };
    let report = finish(storage, result)?;
    print_json(&report)
}
