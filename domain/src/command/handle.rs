//! Command handles and factories
//!
//! A [`CommandHandle`] is the opaque reference a descriptor carries to its
//! implementation. It is either a [`CommandFactory`] that can produce a
//! live instance, or an explicit "discovered but unresolved" state for
//! entries that were identified without a linked implementation.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::naming::simple_type_name;
use super::traits::Command;

/// A live command instance owned by the dispatcher
pub type CommandInstance = Box<dyn Command>;

type CreateFn = dyn Fn() -> Result<CommandInstance, ActivationError> + Send + Sync;

/// Why a command could not be turned into a live instance
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActivationError {
    /// A command module exports the type but no factory for it is linked
    #[error("'{type_name}' is exported by a command module but not linked into this binary")]
    NotLinked { type_name: String },

    /// Found by source scanning only, nothing was compiled
    #[error("'{type_name}' was found in source text and has no compiled implementation")]
    SourceOnly { type_name: String },

    /// The factory itself failed
    #[error("Failed to construct '{type_name}': {reason}")]
    Construction { type_name: String, reason: String },
}

/// Produces instances of one command type
#[derive(Clone)]
pub struct CommandFactory {
    type_name: String,
    create: Arc<CreateFn>,
}

impl CommandFactory {
    /// Create a factory from a fallible constructor
    pub fn new<F>(type_name: impl Into<String>, create: F) -> Self
    where
        F: Fn() -> Result<CommandInstance, ActivationError> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            create: Arc::new(create),
        }
    }

    /// Create a factory from a plain constructor function
    pub fn from_fn(type_name: impl Into<String>, create: fn() -> CommandInstance) -> Self {
        Self::new(type_name, move || Ok(create()))
    }

    /// Factory for a `Default`-constructible command type
    pub fn of<T>() -> Self
    where
        T: Command + Default + 'static,
    {
        Self::new(std::any::type_name::<T>(), || Ok(Box::new(T::default())))
    }

    /// Full type name as given at construction
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Last path segment of the type name
    pub fn simple_name(&self) -> &str {
        simple_type_name(&self.type_name)
    }

    pub fn create(&self) -> Result<CommandInstance, ActivationError> {
        (self.create)()
    }
}

impl fmt::Debug for CommandFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandFactory")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Why a handle has no factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Exported by a command module, missing from the catalog
    NotLinked,
    /// Identified from source text only
    SourceOnly,
}

/// Reference from a descriptor to its implementation
#[derive(Debug, Clone)]
pub enum CommandHandle {
    Resolved(CommandFactory),
    Unresolved {
        type_name: String,
        reason: UnresolvedReason,
    },
}

impl CommandHandle {
    pub fn resolved(factory: CommandFactory) -> Self {
        CommandHandle::Resolved(factory)
    }

    pub fn unresolved(type_name: impl Into<String>, reason: UnresolvedReason) -> Self {
        CommandHandle::Unresolved {
            type_name: type_name.into(),
            reason,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            CommandHandle::Resolved(factory) => factory.type_name(),
            CommandHandle::Unresolved { type_name, .. } => type_name,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, CommandHandle::Resolved(_))
    }

    /// Produce a live instance, or explain why that is impossible
    pub fn activate(&self) -> Result<CommandInstance, ActivationError> {
        match self {
            CommandHandle::Resolved(factory) => factory.create(),
            CommandHandle::Unresolved {
                type_name,
                reason: UnresolvedReason::NotLinked,
            } => Err(ActivationError::NotLinked {
                type_name: type_name.clone(),
            }),
            CommandHandle::Unresolved {
                type_name,
                reason: UnresolvedReason::SourceOnly,
            } => Err(ActivationError::SourceOnly {
                type_name: type_name.clone(),
            }),
        }
    }
}
