//! Domain layer for rust-artisan
//!
//! This crate contains the core entities, value objects and rules of the
//! command discovery pipeline. It has no dependencies on file system,
//! configuration file or terminal concerns.
//!
//! # Core Concepts
//!
//! ## Project Context
//!
//! A [`ProjectContext`] classifies the host project (console, web host,
//! worker service, library) and records the features detected in it.
//!
//! ## Command Table
//!
//! Commands reach the dispatcher through a [`CommandTable`]: an
//! insertion-ordered set of [`CommandDescriptor`]s keyed by dispatch name.
//! Name collisions are settled by [`CommandOrigin`] precedence
//! (Explicit > DiscoveredCompiled > DiscoveredHeuristic).
//!
//! ## Command Catalog
//!
//! Implementations become activatable through a [`CommandCatalog`], a
//! compile-time registry of factories keyed by simple type name.

pub mod command;
pub mod config;
pub mod core;
pub mod project;

// Re-exported so that `inventory::submit!` can be used against the catalog
// without a direct dependency.
pub use inventory;

// Re-export commonly used types
pub use command::{
    catalog::{CommandCatalog, CommandRegistration},
    entities::{CommandDescriptor, CommandOrigin},
    handle::{ActivationError, CommandFactory, CommandHandle, CommandInstance, UnresolvedReason},
    naming::{derive_command_name, simple_type_name},
    table::CommandTable,
    traits::{Command, CommandError, ExitStatus},
};
pub use config::{ArtisanConfiguration, DiscoveryConfiguration, LoggingConfiguration, resolve_alias};
pub use core::{
    diagnostic::{Diagnostic, DiagnosticCode, Severity},
    error::{DomainError, validate_command_name},
};
pub use project::{
    entities::{ProjectContext, ProjectType},
    value_objects::PropertyKey,
};
