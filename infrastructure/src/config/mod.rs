//! Configuration file loading for rust-artisan
//!
//! The project configuration lives at the project root, in the first of
//! these files that exists:
//!
//! 1. `artisan.json`
//! 2. `rust-artisan.json`
//! 3. `.artisan.json`
//!
//! Values present in the file are merged over the built-in defaults.

mod loader;
mod normalize;

pub use loader::{CONFIG_FILE_NAMES, ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE, LoadedConfiguration};
