//! Command discovery port
//!
//! Finds command implementations under a directory. A missing directory is
//! not an error: it produces an empty, complete outcome.

use artisan_domain::{CommandDescriptor, CommandOrigin, Diagnostic};
use std::path::Path;

/// Result of one discovery run
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// Discovered entries (compiled or heuristic origin), in discovery order
    pub commands: Vec<CommandDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
    /// `false` when the run stopped early because its budget ran out
    pub complete: bool,
}

impl Default for DiscoveryOutcome {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            diagnostics: Vec::new(),
            complete: true,
        }
    }
}

impl DiscoveryOutcome {
    /// Empty, complete outcome
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Entries backed by a command module
    pub fn compiled(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands
            .iter()
            .filter(|c| c.origin != CommandOrigin::DiscoveredHeuristic)
    }

    /// Entries identified from source text only
    pub fn heuristic(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands
            .iter()
            .filter(|c| c.origin == CommandOrigin::DiscoveredHeuristic)
    }
}

/// Port for command discovery
pub trait CommandDiscoveryPort {
    /// Enumerate command candidates under `path`
    fn discover(&self, path: &Path) -> DiscoveryOutcome;
}

/// Discovery that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscovery;

impl CommandDiscoveryPort for NoDiscovery {
    fn discover(&self, _path: &Path) -> DiscoveryOutcome {
        DiscoveryOutcome::empty()
    }
}
