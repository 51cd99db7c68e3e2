//! Presentation layer for rust-artisan
//!
//! This crate contains the CLI definition, the clap-backed command
//! dispatcher and console output formatting.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Invocation, OutputFormat};
pub use cli::dispatcher::ClapDispatcher;
pub use output::console::ConsoleFormatter;
