use std::sync::Arc;

use anyhow::Result;
use artpaper_core::{AppConfig, CatalogSource, WebGalleryOfArt};
use artpaper_service::CatalogIngester;

use super::{finish, interruptible, open_store, print_json};

pub(crate) async fn run_ingest(config: &AppConfig) -> Result<()> {
    let catalog_file = config.catalog_path(WebGalleryOfArt.catalog_file());
    let storage = open_store(config)?;

    let result = {
        let ingester = CatalogIngester::new(Arc::new(storage.clone()), Arc::new(WebGalleryOfArt));
        interruptible(ingester.ingest_catalog(&catalog_file)).await
    };
    let report = finish(storage, result)?;
    print_json(&report)
}
