//! Core types for artpaper
//!
//! Domain records, metadata normalization, catalog sources, wallpaper geometry,
//! and configuration shared across all other crates.

mod art;
mod catalog;
mod config;
mod constants;
mod env_config;
mod error;
mod file_name;
pub mod normalize;
mod wallpaper;

pub use art::*;
pub use catalog::*;
pub use config::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use file_name::*;
pub use wallpaper::*;
