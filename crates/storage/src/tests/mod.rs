//! Test utilities and module declarations for storage tests.

use crate::Storage;
use artpaper_core::NewArtRecord;
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_record(url: &str) -> NewArtRecord {
    NewArtRecord {
        url: url.to_owned(),
        catalog_source: "Web Gallery of Art".to_owned(),
        license: "unknown".to_owned(),
        artist: "Hans Von Aachen".to_owned(),
        title: format!("Allegory {url}"),
        date: "1598".to_owned(),
        technique: "Oil on copper".to_owned(),
        location: "Alte Pinakothek, Munich".to_owned(),
        form: "painting".to_owned(),
        art_type: "mythological".to_owned(),
        school: "German".to_owned(),
        timeframe: "1551-1600".to_owned(),
    }
}

mod migration_tests;
