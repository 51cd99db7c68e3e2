//! Artisan configuration model
//!
//! The configuration is loaded once at process start (see the
//! infrastructure `ConfigLoader`) and is read-only afterwards. It is the
//! only state that survives between runs.

mod artisan_config;

pub use artisan_config::{
    ArtisanConfiguration, DEFAULT_COMMANDS_PATH, DiscoveryConfiguration, LoggingConfiguration,
    resolve_alias,
};
