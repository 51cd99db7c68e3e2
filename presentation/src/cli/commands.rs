//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for `--show-context`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when enabled
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// A project command and everything typed after it
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Command name followed by its arguments, exactly as given.
    ///
    /// Host options are only recognised before the command name, so
    /// `artisan make:model -v --help` hands `-v --help` to `make:model`.
    #[command(external_subcommand)]
    Run(Vec<String>),
}

/// CLI arguments for artisan
#[derive(Parser, Debug)]
#[command(name = "artisan")]
#[command(disable_help_subcommand = true)]
#[command(author, version, about = "Project command runner - discovers and runs a project's own commands")]
#[command(long_about = r#"
Artisan collects the commands of a Cargo project and runs them by name.

Commands come from three places, highest precedence first:
1. Built-in commands registered by this binary
2. Command modules (*.cmdmod) under the commands directory
3. Source files implementing `Command` (listed as hints, never run)

Configuration is read from the project root (first match wins):
  artisan.json, rust-artisan.json, .artisan.json

Example:
  artisan                       List available commands
  artisan about                 Show what kind of project this is
  artisan config:publish        Write the default artisan.json
  artisan make:model Person     Run a project command
"#)]
pub struct Cli {
    /// Command to run and its arguments (lists commands when omitted)
    #[command(subcommand)]
    pub invocation: Option<Invocation>,

    /// Project root directory
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub project: PathBuf,

    /// Directory to scan for commands, relative to the project root
    #[arg(long, value_name = "PATH")]
    pub commands_path: Option<PathBuf>,

    /// Disable command discovery
    #[arg(long)]
    pub no_discovery: bool,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show the detected project context and exit
    #[arg(long)]
    pub show_context: bool,

    /// List source-only command hints after the command listing
    #[arg(long)]
    pub show_hints: bool,

    /// Output format for --show-context
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Command line forwarded to the dispatcher: command name, then its arguments
    pub fn command_line(&self) -> Option<Vec<String>> {
        match &self.invocation {
            Some(Invocation::Run(line)) => Some(line.clone()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_trailing_args_are_forwarded() {
        let cli = Cli::try_parse_from(["artisan", "--no-config", "make:model", "Person", "--force", "-x"]).unwrap();
        assert!(cli.no_config);
        assert_eq!(
            cli.command_line().unwrap(),
            vec!["make:model", "Person", "--force", "-x"]
        );
    }

    #[test]
    fn test_flags_after_command_belong_to_it() {
        let cli = Cli::try_parse_from(["artisan", "make:model", "-v"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.command_line().unwrap(), vec!["make:model", "-v"]);

        let cli = Cli::try_parse_from(["artisan", "-v", "make:model", "--help", "--project", "x"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.project, PathBuf::from("."));
        assert_eq!(
            cli.command_line().unwrap(),
            vec!["make:model", "--help", "--project", "x"]
        );
    }

    #[test]
    fn test_host_help_before_command() {
        let err = Cli::try_parse_from(["artisan", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_no_command_lists() {
        let cli = Cli::try_parse_from(["artisan", "-vv", "--project", "/srv/app"]).unwrap();
        assert!(cli.command_line().is_none());
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.project, PathBuf::from("/srv/app"));
        assert_eq!(cli.format, OutputFormat::Text);
    }
}
