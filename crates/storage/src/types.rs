use serde::Serialize;

/// Result of inserting a record keyed by URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written with this id.
    Inserted(i64),
    /// A row with the same URL already exists and was left untouched.
    AlreadyExists,
}

impl InsertOutcome {
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Result of recording a downloaded image on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// `file_name` was set and `modified` bumped.
    Marked,
    /// The record already had a file name; nothing changed.
    AlreadyMarked,
    /// No record has this id.
    NotFound,
}

/// Record totals for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoreCounts {
    pub total: usize,
    pub downloaded: usize,
}

impl StoreCounts {
    #[must_use]
    pub const fn missing(&self) -> usize {
        self.total.saturating_sub(self.downloaded)
    }
}
