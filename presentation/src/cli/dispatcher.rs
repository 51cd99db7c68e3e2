//! clap-backed command dispatcher
//!
//! Each registered entry becomes one clap subcommand whose arguments are
//! collected verbatim and handed to [`Command::execute`]. Aliases from the
//! configuration are resolved before the subcommand is looked up.
//!
//! [`Command::execute`]: artisan_domain::Command::execute

use artisan_application::{DispatchEntry, DispatchError, DispatcherPort, RegistrationError};
use artisan_domain::{CommandError, DomainError, ExitStatus, resolve_alias, validate_command_name};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction};
use std::collections::BTreeMap;
use tracing::{debug, trace};

const ARGS: &str = "args";

/// Dispatcher that parses command lines with clap
#[derive(Debug)]
pub struct ClapDispatcher {
    bin_name: String,
    entries: Vec<DispatchEntry>,
    aliases: BTreeMap<String, String>,
}

impl ClapDispatcher {
    pub fn new(bin_name: impl Into<String>) -> Self {
        Self {
            bin_name: bin_name.into(),
            entries: Vec::new(),
            aliases: BTreeMap::new(),
        }
    }

    /// Alias table (alias → canonical name) consulted on every dispatch
    pub fn with_aliases(mut self, aliases: BTreeMap<String, String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The clap command tree, one subcommand per entry in registration order
    pub fn command(&self) -> clap::Command {
        let mut command = clap::Command::new(self.bin_name.clone())
            .disable_help_subcommand(true)
            .subcommand_required(true);

        for (order, entry) in self.entries.iter().enumerate() {
            let mut subcommand = clap::Command::new(entry.name.clone())
                .display_order(order)
                .arg(
                    Arg::new(ARGS)
                        .action(ArgAction::Append)
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true)
                        .value_name("ARGS"),
                );
            if !entry.description.is_empty() {
                subcommand = subcommand.about(entry.description.clone());
            }
            if let Some(examples) = self.examples_help(entry) {
                subcommand = subcommand.after_help(examples);
            }
            command = command.subcommand(subcommand);
        }
        command
    }

    /// Help listing with every registered command
    pub fn render_help(&self) -> String {
        self.command().render_help().to_string()
    }

    fn examples_help(&self, entry: &DispatchEntry) -> Option<String> {
        if entry.examples.is_empty() {
            return None;
        }
        let lines: Vec<String> = entry
            .examples
            .iter()
            .map(|example| format!("  {} {}", self.bin_name, example.join(" ")))
            .collect();
        Some(format!("Examples:\n{}", lines.join("\n")))
    }

    fn find(&self, name: &str) -> Option<&DispatchEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl DispatcherPort for ClapDispatcher {
    fn register(&mut self, entry: DispatchEntry) -> Result<(), RegistrationError> {
        validate_command_name(&entry.name)?;
        if entry.name.starts_with('-') {
            return Err(DomainError::InvalidCommandName(entry.name).into());
        }
        if self.find(&entry.name).is_some() {
            return Err(RegistrationError::AlreadyRegistered(entry.name));
        }
        trace!(command = %entry.name, "Registered subcommand");
        self.entries.push(entry);
        Ok(())
    }

    fn registered_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    fn dispatch(&self, args: &[String]) -> Result<ExitStatus, DispatchError> {
        let Some((token, rest)) = args.split_first() else {
            return Err(DispatchError::NoCommand);
        };

        let name = resolve_alias(&self.aliases, token);
        if name != token.as_str() {
            debug!(alias = %token, command = %name, "Resolved alias");
        }
        let entry = self
            .find(name)
            .ok_or_else(|| DispatchError::UnknownCommand(token.clone()))?;

        let argv = std::iter::once(self.bin_name.as_str())
            .chain(std::iter::once(name))
            .chain(rest.iter().map(String::as_str));

        let matches = match self.command().try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                return Err(DispatchError::Help(e.render().to_string()));
            }
            Err(e) => {
                return Err(DispatchError::Command {
                    name: name.to_string(),
                    source: CommandError::InvalidArguments(e.render().to_string().trim().to_string()),
                });
            }
        };

        let forwarded: Vec<String> = matches
            .subcommand_matches(name)
            .and_then(|sub| sub.get_many::<String>(ARGS))
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        debug!(command = %name, args = forwarded.len(), "Dispatching");
        entry
            .command
            .execute(&forwarded)
            .map_err(|source| DispatchError::Command {
                name: name.to_string(),
                source,
            })
    }
}
