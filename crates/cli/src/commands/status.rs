use anyhow::Result;
use artpaper_core::AppConfig;

use super::{finish, open_store, print_json};

pub(crate) fn run_status(config: &AppConfig) -> Result<()> {
    let storage = open_store(config)?;
    let result = storage.counts().map_err(anyhow::Error::from);
    let counts = finish(storage, result)?;
    print_json(&serde_json::json!({
        "database": config.database_file,
        "total": counts.total,
        "downloaded": counts.downloaded,
        "missing": counts.missing(),
    }))
}
