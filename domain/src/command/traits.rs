//! The command capability
//!
//! Anything the dispatcher can run implements [`Command`]. Implementations
//! parse their own argument vector, do their work and report an exit status.

use thiserror::Error;

/// Process exit status reported by a command (0 = success)
pub type ExitStatus = i32;

/// Errors a command can return from [`Command::execute`]
#[derive(Debug, Error)]
pub enum CommandError {
    /// The argument vector could not be parsed
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The command ran and failed
    #[error("Command failed: {0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Exit status the dispatcher reports for this error
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            CommandError::InvalidArguments(_) => 2,
            CommandError::Failed(_) | CommandError::Io(_) => 1,
        }
    }
}

/// A dispatchable command.
///
/// `args` holds everything after the command name, unparsed.
///
/// # Example
///
/// ```
/// use artisan_domain::{Command, CommandError, ExitStatus};
///
/// #[derive(Default)]
/// struct GreetCommand;
///
/// impl Command for GreetCommand {
///     fn description(&self) -> &str {
///         "Greets someone"
///     }
///
///     fn execute(&self, args: &[String]) -> Result<ExitStatus, CommandError> {
///         let name = args
///             .first()
///             .ok_or_else(|| CommandError::InvalidArguments("missing <name>".into()))?;
///         println!("Hello, {name}!");
///         Ok(0)
///     }
/// }
///
/// let cmd = GreetCommand;
/// assert_eq!(cmd.execute(&["Ada".to_string()]).unwrap(), 0);
/// assert!(cmd.execute(&[]).is_err());
/// ```
pub trait Command: Send + Sync {
    /// One-line description shown in the command listing
    fn description(&self) -> &str {
        ""
    }

    /// Example argument vectors shown in the command's help
    fn examples(&self) -> Vec<Vec<String>> {
        Vec::new()
    }

    /// Parse `args`, run, and report an exit status
    fn execute(&self, args: &[String]) -> Result<ExitStatus, CommandError>;
}
