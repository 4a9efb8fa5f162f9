//! Migration v2: indexes for the download and composition work queues

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_art_file_name ON art(file_name);
CREATE INDEX IF NOT EXISTS idx_art_modified ON art(modified);
";
