//! Infrastructure layer for rust-artisan
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: filesystem project detection, command
//! discovery, and configuration file loading.

pub mod config;
pub mod context;
pub mod discovery;
mod walk;

// Re-export commonly used types
pub use config::{CONFIG_FILE_NAMES, ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE, LoadedConfiguration};
pub use context::FsProjectDetector;
pub use discovery::{CommandModule, FsCommandDiscovery, ModuleLoadError};
