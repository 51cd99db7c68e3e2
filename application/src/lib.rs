//! Application layer for rust-artisan
//!
//! This crate contains port definitions and the use case that turns
//! explicit registrations plus discovery results into a command table.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    command_discovery::{CommandDiscoveryPort, DiscoveryOutcome, NoDiscovery},
    dispatcher::{DispatchEntry, DispatchError, DispatcherPort, RegistrationError},
    project_detector::{DetectionOutcome, ProjectDetectorPort},
};
pub use use_cases::build_command_table::{ArtisanBuilder, BuildReport, ExplicitRegistration};
