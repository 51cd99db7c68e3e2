//! CLI entrypoint for rust-artisan
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;

use anyhow::{Context, Result, bail};
use artisan_application::{ArtisanBuilder, BuildReport, DispatchError, DispatcherPort, ProjectDetectorPort};
use artisan_domain::{Diagnostic, LoggingConfiguration, Severity};
use artisan_infrastructure::{ConfigLoader, FsCommandDiscovery, FsProjectDetector};
use artisan_presentation::{ClapDispatcher, Cli, ConsoleFormatter, OutputFormat};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const BIN_NAME: &str = "artisan";

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let project = cli
        .project
        .canonicalize()
        .with_context(|| format!("Project directory not found: {}", cli.project.display()))?;
    if !project.is_dir() {
        bail!("Project path is not a directory: {}", project.display());
    }

    // === Configuration ===
    let loaded = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(&project)
    };
    let config = loaded.configuration;

    init_logging(cli.verbose, &config.logging);
    match &loaded.source {
        Some(path) => info!(path = %path.display(), "Using configuration file"),
        None => debug!("Using default configuration"),
    }
    log_diagnostics(&loaded.diagnostics);

    if cli.show_context {
        let outcome = FsProjectDetector::new().detect(&project);
        log_diagnostics(&outcome.diagnostics);
        match cli.format {
            OutputFormat::Text => print!("{}", ConsoleFormatter::format_context(&outcome.context)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_context_json(&outcome.context)),
        }
        return Ok(ExitCode::SUCCESS);
    }

    // === Dependency Injection ===
    let discovery = FsCommandDiscovery::linked().with_limits(config.discovery.clone());
    let mut builder = ArtisanBuilder::new(FsProjectDetector::new(), discovery, &project)
        .with_configuration(config.clone());
    for registration in commands::builtin_registrations(&project) {
        builder = builder.add_registration(registration);
    }
    if let Some(path) = &cli.commands_path {
        builder = builder.use_command_discovery(path);
    }
    if cli.no_discovery {
        builder = builder.without_discovery();
    }

    let mut dispatcher = ClapDispatcher::new(BIN_NAME).with_aliases(config.aliases.clone());
    let report = builder.build(&mut dispatcher);

    // === Dispatch ===
    let Some(command_line) = cli.command_line() else {
        // Build diagnostics go out with the listing, not the log
        print!("{}", render_listing(&report, cli.show_hints));
        return Ok(ExitCode::SUCCESS);
    };

    log_diagnostics(&report.diagnostics);
    match dispatcher.dispatch(&command_line) {
        Ok(status) => Ok(exit_code(status)),
        Err(DispatchError::Help(text)) => {
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ DispatchError::UnknownCommand(_)) => {
            eprintln!("error: {e}");
            eprintln!("Run `{BIN_NAME}` without arguments to list available commands.");
            Ok(exit_code(e.exit_status()))
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(exit_code(e.exit_status()))
        }
    }
}

/// Command listing, optional hints, then the diagnostics summary
fn render_listing(report: &BuildReport, show_hints: bool) -> String {
    let mut output = ConsoleFormatter::format_listing(report);
    if show_hints {
        output.push_str(&ConsoleFormatter::format_hints(&report.hints));
    }
    output.push_str(&ConsoleFormatter::format_diagnostics(&report.diagnostics));
    output
}

/// Initialize logging: `-v` flags override the configured level
fn init_logging(verbose: u8, logging: &LoggingConfiguration) {
    let directive = match verbose {
        0 => logging.filter_directive(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(), // -vvv or more
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    if !logging.enable_colors {
        colored::control::set_override(false);
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(logging.enable_colors)
        .with_writer(std::io::stderr);

    if logging.enable_timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let path = diagnostic.path.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
        match diagnostic.severity {
            Severity::Warning => warn!(code = %diagnostic.code, path = %path, "{}", diagnostic.message),
            Severity::Info => info!(code = %diagnostic.code, path = %path, "{}", diagnostic.message),
        }
    }
}

fn exit_code(status: i32) -> ExitCode {
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
