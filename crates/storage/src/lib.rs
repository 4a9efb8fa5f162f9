//! Storage layer for artpaper
//!
//! SQLite-backed art record store. All access goes through one connection guarded
//! by a mutex; the async [`ArtStore`] trait runs each call on the blocking pool.

mod error;
mod migrations;
mod sqlite_async;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;
mod types;

pub use error::StorageError;
pub use storage::Storage;
pub use traits::ArtStore;
pub use types::{InsertOutcome, MarkOutcome, StoreCounts};
