//! Command domain module
//!
//! This module defines how a command travels from "somewhere in the host
//! project" to "an entry the dispatcher can run".
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │ CommandHandle    │───▶│ CommandDescriptor│───▶│ CommandTable     │
//! │ (factory or      │    │ (name, origin,   │    │ (ordered, unique │
//! │  unresolved)     │    │  description)    │    │  by name)        │
//! └──────────────────┘    └──────────────────┘    └──────────────────┘
//!          ▲
//!          └─ CommandCatalog: type name → factory (compile-time registry)
//! ```
//!
//! # Naming
//!
//! Dispatch names are derived from the implementing type's simple name:
//! `MakeModelCommand` → `makemodel`. See [`naming::derive_command_name`].
//!
//! # Origin Precedence
//!
//! | Origin              | Rank | Source                                   |
//! |---------------------|------|------------------------------------------|
//! | Explicit            | 2    | registered by the host                   |
//! | DiscoveredCompiled  | 1    | command module export tables             |
//! | DiscoveredHeuristic | 0    | source text scan (advisory only)         |

pub mod catalog;
pub mod entities;
pub mod handle;
pub mod naming;
pub mod table;
pub mod traits;

pub use catalog::{CommandCatalog, CommandRegistration};
pub use entities::{CommandDescriptor, CommandOrigin};
pub use handle::{ActivationError, CommandFactory, CommandHandle, CommandInstance, UnresolvedReason};
pub use naming::{derive_command_name, simple_type_name};
pub use table::CommandTable;
pub use traits::{Command, CommandError, ExitStatus};
