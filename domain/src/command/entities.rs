//! Command descriptors

use std::fmt;
use std::path::{Path, PathBuf};

use super::handle::{CommandFactory, CommandHandle, UnresolvedReason};
use super::naming::derive_command_name;

/// Where a command entry came from.
///
/// Ordered by precedence: a higher variant wins a name collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandOrigin {
    /// Identified by scanning source text; advisory only
    DiscoveredHeuristic,
    /// Exported by a command module
    DiscoveredCompiled,
    /// Registered by the host
    Explicit,
}

impl CommandOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandOrigin::DiscoveredHeuristic => "heuristic",
            CommandOrigin::DiscoveredCompiled => "compiled",
            CommandOrigin::Explicit => "explicit",
        }
    }
}

impl fmt::Display for CommandOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the command table
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Dispatch name, unique within a table
    pub name: String,
    pub handle: CommandHandle,
    pub origin: CommandOrigin,
    pub description: String,
    pub examples: Vec<Vec<String>>,
    /// File a discovered entry was found in
    pub source: Option<PathBuf>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>, handle: CommandHandle, origin: CommandOrigin) -> Self {
        Self {
            name: name.into(),
            handle,
            origin,
            description: String::new(),
            examples: Vec::new(),
            source: None,
        }
    }

    /// Explicit entry, named `name` or derived from the factory's type name
    pub fn explicit(factory: CommandFactory, name: Option<&str>) -> Self {
        let name = match name {
            Some(name) => name.to_string(),
            None => derive_command_name(factory.type_name()),
        };
        Self::new(name, CommandHandle::resolved(factory), CommandOrigin::Explicit)
    }

    /// Entry found in a command module
    pub fn compiled(handle: CommandHandle, source: impl AsRef<Path>) -> Self {
        let name = derive_command_name(handle.type_name());
        Self::new(name, handle, CommandOrigin::DiscoveredCompiled).with_source(source)
    }

    /// Entry found by source scanning
    pub fn heuristic(type_name: impl Into<String>, source: impl AsRef<Path>) -> Self {
        let type_name = type_name.into();
        let name = derive_command_name(&type_name);
        let handle = CommandHandle::unresolved(type_name, UnresolvedReason::SourceOnly);
        Self::new(name, handle, CommandOrigin::DiscoveredHeuristic).with_source(source)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example<I, S>(mut self, example: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples.push(example.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_source(mut self, source: impl AsRef<Path>) -> Self {
        self.source = Some(source.as_ref().to_path_buf());
        self
    }

    /// Whether this entry may be handed to the dispatcher
    pub fn is_activatable(&self) -> bool {
        self.origin != CommandOrigin::DiscoveredHeuristic && self.handle.is_resolved()
    }

    /// Identity used when deduplicating discovery results
    pub fn identity(&self) -> (&str, CommandOrigin) {
        (&self.name, self.origin)
    }
}
