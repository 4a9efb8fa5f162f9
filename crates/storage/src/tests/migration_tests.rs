#![expect(clippy::unwrap_used, reason = "test code")]

use rusqlite::Connection;
use tempfile::TempDir;

use crate::migrations::SCHEMA_VERSION;
use crate::{MarkOutcome, Storage};

fn user_version(path: &std::path::Path) -> i32 {
    let conn = Connection::open(path).unwrap();
    conn.pragma_query_value(None, "user_version", |row| row.get(0)).unwrap()
}

#[test]
fn test_fresh_database_reaches_schema_version() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("art.db");
    Storage::new(&db_path).unwrap().close().unwrap();
    assert_eq!(user_version(&db_path), SCHEMA_VERSION);

    // Re-running migrations on an up-to-date database is a no-op.
    Storage::new(&db_path).unwrap().close().unwrap();
    assert_eq!(user_version(&db_path), SCHEMA_VERSION);
}

#[test]
fn test_adopts_legacy_art_table() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("legacy.db");
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE art (
                art_id INTEGER PRIMARY KEY,
                url TEXT NOT NULL UNIQUE,
                catalog TEXT, license TEXT, file_name TEXT, artist TEXT, title TEXT,
                date TEXT, technique TEXT, location TEXT, form TEXT, type TEXT,
                school TEXT, timeframe TEXT,
                created DATETIME DEFAULT CURRENT_TIMESTAMP,
                modified DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            INSERT INTO art (url, catalog, title) VALUES ('https://x.org/art/a.jpg', 'Web Gallery of Art', 'Allegory');
            INSERT INTO art (url, catalog, title, file_name, modified)
                VALUES ('https://x.org/art/b.jpg', 'Web Gallery of Art', 'Bacchus', '2-bacchus.jpg', '2019-05-01 10:00:00');",
        )
        .unwrap();
    }

    let storage = Storage::new(&db_path).unwrap();
    let legacy = storage.find_by_url("https://x.org/art/a.jpg").unwrap().unwrap();
    assert_eq!(legacy.title, "Allegory");
    assert_eq!(legacy.artist, "");
    assert_eq!(legacy.file_name, None);

    let downloaded = storage.select_recent_with_images(10).unwrap();
    assert_eq!(downloaded.len(), 1);
    assert_eq!(downloaded[0].modified.to_string(), "2019-05-01 10:00:00 UTC");

    assert_eq!(storage.mark_downloaded(legacy.id, "1-allegory.jpg").unwrap(), MarkOutcome::Marked);
    let recent = storage.select_recent_with_images(10).unwrap();
    assert_eq!(recent[0].id, legacy.id);
}
