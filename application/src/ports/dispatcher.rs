//! Dispatcher port
//!
//! The dispatcher owns live command instances. Every entry of the final
//! command table is registered exactly once, in table order, before the
//! first dispatch.

use artisan_domain::{CommandError, CommandInstance, DomainError, ExitStatus};
use thiserror::Error;

/// A command ready to be registered
pub struct DispatchEntry {
    pub name: String,
    pub description: String,
    pub examples: Vec<Vec<String>>,
    pub command: CommandInstance,
}

impl std::fmt::Debug for DispatchEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("examples", &self.examples)
            .finish_non_exhaustive()
    }
}

/// Why the dispatcher refused an entry
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error(transparent)]
    InvalidName(#[from] DomainError),

    #[error("Command '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Errors raised while dispatching a command line
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("No command given")]
    NoCommand,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Help or version output was requested; the rendered text is carried
    #[error("{0}")]
    Help(String),

    #[error("Command '{name}' failed: {source}")]
    Command {
        name: String,
        #[source]
        source: CommandError,
    },
}

impl DispatchError {
    /// Exit status to report for this error
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            DispatchError::Help(_) => 0,
            DispatchError::NoCommand | DispatchError::UnknownCommand(_) => 1,
            DispatchError::Command { source, .. } => source.exit_status(),
        }
    }
}

/// Port for the command dispatcher
pub trait DispatcherPort {
    /// Register one command under `entry.name`
    fn register(&mut self, entry: DispatchEntry) -> Result<(), RegistrationError>;

    /// Registered names, in registration order
    fn registered_names(&self) -> Vec<String>;

    /// Run the command named by `args[0]` with the remaining arguments
    fn dispatch(&self, args: &[String]) -> Result<ExitStatus, DispatchError>;
}
