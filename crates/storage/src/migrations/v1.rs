//! Migration v1: art table
//!
//! Same shape as databases written by earlier catalog tools, so an existing
//! `art` table is adopted as-is.

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS art (
    art_id INTEGER PRIMARY KEY,
    url TEXT NOT NULL UNIQUE,
    catalog TEXT,
    license TEXT,
    file_name TEXT,
    artist TEXT,
    title TEXT,
    date TEXT,
    technique TEXT,
    location TEXT,
    form TEXT,
    type TEXT,
    school TEXT,
    timeframe TEXT,
    created DATETIME DEFAULT CURRENT_TIMESTAMP,
    modified DATETIME DEFAULT CURRENT_TIMESTAMP
);
";
