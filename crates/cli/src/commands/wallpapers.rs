use std::sync::Arc;

use anyhow::Result;
use artpaper_core::AppConfig;
use artpaper_imaging::MagickProcessor;
use artpaper_service::WallpaperComposer;

use super::{clamp_batch, ensure_dir, finish, interruptible, open_store, print_json};

pub(crate) async fn run_create_wallpapers(config: &AppConfig, max: usize) -> Result<()> {
    ensure_dir(&config.wallpaper_dir)?;
    let storage = open_store(config)?;

    let result = {
        let composer = WallpaperComposer::new(
            Arc::new(storage.clone()),
            Arc::new(MagickProcessor::new(config.magick_program.as_str())),
            config.art_dir.clone(),
            config.wallpaper_dir.clone(),
        );
        interruptible(composer.compose(clamp_batch(max), &config.wallpaper_sizes, &config.style)).await
    };
    let report = finish(storage, result)?;
    print_json(&report)
}
