//! Command discovery
//!
//! This module provides the [`FsCommandDiscovery`] implementation of
//! [`CommandDiscoveryPort`] that finds command types under a directory.
//!
//! # Tiers
//!
//! ```text
//! discover(path)
//!   │
//!   ├─ 1. *.cmdmod export tables ──► catalog lookup ──► compiled entries
//!   │        (load failure: warning, module skipped)
//!   │
//!   └─ 2. *.rs source text (only when tier 1 found nothing)
//!            └─► heuristic entries (advisory, never registered)
//! ```
//!
//! Files are processed in path order. The file count is budgeted per tier
//! and the deadline covers the whole run, including enumeration. When either
//! runs out the outcome is marked incomplete and carries a warning.

mod budget;
pub mod module;
pub mod source_scan;

pub use budget::{Budget, Exhausted};
pub use module::{CommandModule, ExportedType, ModuleLoadError, TypeKind};

use crate::walk::files_with_extension_checked;
use artisan_application::{CommandDiscoveryPort, DiscoveryOutcome};
use artisan_domain::{
    CommandCatalog, CommandDescriptor, CommandHandle, CommandOrigin, Diagnostic, DiagnosticCode,
    DiscoveryConfiguration, UnresolvedReason,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Discovery over the local file system.
///
/// Compiled entries resolve through a [`CommandCatalog`]; exported types the
/// catalog does not know are still reported, with an unresolved handle.
#[derive(Debug, Clone, Default)]
pub struct FsCommandDiscovery {
    catalog: CommandCatalog,
    limits: DiscoveryConfiguration,
}

impl FsCommandDiscovery {
    pub fn new(catalog: CommandCatalog) -> Self {
        Self {
            catalog,
            limits: DiscoveryConfiguration::default(),
        }
    }

    /// Discovery backed by every command linked into this binary
    pub fn linked() -> Self {
        Self::new(CommandCatalog::linked())
    }

    pub fn with_limits(mut self, limits: DiscoveryConfiguration) -> Self {
        self.limits = limits;
        self
    }

    /// Tier 1: command module export tables
    fn scan_modules(&self, root: &Path, budget: &mut Budget, outcome: &mut DiscoveryOutcome) -> Result<(), Exhausted> {
        let files = files_with_extension_checked(root, module::MODULE_EXTENSION, false, || budget.check_deadline())?;
        for path in files {
            budget.charge()?;

            let module = match CommandModule::load(&path) {
                Ok(module) => module,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Skipping command module");
                    outcome.diagnostics.push(
                        Diagnostic::warning(DiagnosticCode::ModuleLoadFailed, e.to_string()).with_path(&path),
                    );
                    continue;
                }
            };

            trace!(path = %path.display(), module = %module.module, types = module.types.len(), "Loaded command module");
            for export in module.commands() {
                let handle = match self.catalog.resolve(&export.name) {
                    Some(factory) => CommandHandle::resolved(factory.clone()),
                    None => CommandHandle::unresolved(&export.name, UnresolvedReason::NotLinked),
                };
                let mut descriptor = CommandDescriptor::compiled(handle, &path).with_description(&export.description);
                descriptor.examples = export.examples.clone();
                outcome.commands.push(descriptor);
            }
        }
        Ok(())
    }

    /// Tier 2: heuristic source scan
    fn scan_sources(&self, root: &Path, budget: &mut Budget, outcome: &mut DiscoveryOutcome) -> Result<(), Exhausted> {
        let files = files_with_extension_checked(root, "rs", true, || budget.check_deadline())?;
        for path in files {
            budget.charge()?;

            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    outcome.diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticCode::SourceUnreadable,
                            format!("Could not read source file: {e}"),
                        )
                        .with_path(&path),
                    );
                    continue;
                }
            };

            for type_name in source_scan::command_types(&text) {
                trace!(path = %path.display(), type_name = %type_name, "Source hint");
                outcome
                    .commands
                    .push(CommandDescriptor::heuristic(type_name, &path));
            }
        }
        Ok(())
    }
}

impl CommandDiscoveryPort for FsCommandDiscovery {
    fn discover(&self, path: &Path) -> DiscoveryOutcome {
        let mut outcome = DiscoveryOutcome::empty();
        if !path.is_dir() {
            debug!(path = %path.display(), "Discovery path does not exist");
            return outcome;
        }

        let mut budget = Budget::start(&self.limits);
        let mut result = self.scan_modules(path, &mut budget, &mut outcome);

        if result.is_ok() && outcome.is_empty() {
            budget.next_tier();
            result = self.scan_sources(path, &mut budget, &mut outcome);
        }

        if let Err(exhausted) = result {
            debug!(path = %path.display(), reason = %exhausted, "Discovery stopped early");
            outcome.complete = false;
            outcome.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::DiscoveryIncomplete,
                    format!("Command discovery stopped early ({exhausted}); results may be partial"),
                )
                .with_path(path),
            );
        }

        dedupe(&mut outcome.commands);

        let hints = outcome.heuristic().count();
        if hints > 0 {
            outcome.diagnostics.push(
                Diagnostic::info(
                    DiagnosticCode::SourceOnlyCommands,
                    format!(
                        "{hints} command type(s) found in source files only; \
                         they are listed as hints until a command module exports them"
                    ),
                )
                .with_path(path),
            );
        }
        debug!(
            path = %path.display(),
            compiled = outcome.compiled().count(),
            heuristic = outcome.heuristic().count(),
            activatable = outcome.commands.iter().filter(|c| c.is_activatable()).count(),
            complete = outcome.complete,
            "Discovery finished"
        );
        outcome
    }
}

/// Drop entries with the same name and origin as an earlier one
fn dedupe(commands: &mut Vec<CommandDescriptor>) {
    let mut seen: HashSet<(String, CommandOrigin)> = HashSet::new();
    commands.retain(|c| {
        let (name, origin) = c.identity();
        seen.insert((name.to_string(), origin))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisan_domain::{Command, CommandError, ExitStatus, Severity};
    use tempfile::{TempDir, tempdir};

    #[derive(Default)]
    struct FooCommand;

    impl Command for FooCommand {
        fn description(&self) -> &str {
            "foo"
        }

        fn execute(&self, _args: &[String]) -> Result<ExitStatus, CommandError> {
            Ok(0)
        }
    }

    fn tree(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (relative, content) in files {
            let path = dir.path().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn module_json(types: &[&str]) -> String {
        let types: Vec<String> = types
            .iter()
            .map(|name| format!(r#"{{ "name": "{name}", "capabilities": ["command"] }}"#))
            .collect();
        format!(r#"{{ "module": "test", "types": [{}] }}"#, types.join(","))
    }

    fn discovery() -> FsCommandDiscovery {
        FsCommandDiscovery::new(CommandCatalog::new().with::<FooCommand>())
    }

    #[test]
    fn test_missing_path_is_empty_and_complete() {
        let dir = tempdir().unwrap();
        let outcome = discovery().discover(&dir.path().join("nope"));
        assert!(outcome.is_empty());
        assert!(outcome.complete);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_compiled_entries_resolve_through_catalog() {
        let dir = tree(&[("app.cmdmod", &module_json(&["FooCommand", "GhostCommand"]))]);
        let outcome = discovery().discover(dir.path());

        let names: Vec<_> = outcome.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "ghost"]);
        assert!(outcome.commands[0].handle.is_resolved());
        assert!(!outcome.commands[1].handle.is_resolved());
        assert!(outcome.commands.iter().all(|c| c.origin == CommandOrigin::DiscoveredCompiled));
        assert_eq!(outcome.commands[0].source, Some(dir.path().join("app.cmdmod")));
    }

    #[test]
    fn test_module_metadata_is_carried() {
        let dir = tree(&[(
            "app.cmdmod",
            r#"{ "types": [ { "name": "FooCommand", "capabilities": ["command"], "description": "Does foo", "examples": [["foo", "--bar"]] } ] }"#,
        )]);
        let outcome = discovery().discover(dir.path());
        assert_eq!(outcome.commands[0].description, "Does foo");
        assert_eq!(outcome.commands[0].examples, vec![vec!["foo", "--bar"]]);
    }

    #[test]
    fn test_broken_module_is_skipped_with_warning() {
        let dir = tree(&[
            ("a.cmdmod", "{ this is not json"),
            ("b.cmdmod", &module_json(&["FooCommand"])),
        ]);
        let outcome = discovery().discover(dir.path());

        assert_eq!(outcome.commands.len(), 1);
        assert_eq!(outcome.diagnostics.len(), 1);
        let warning = &outcome.diagnostics[0];
        assert_eq!(warning.code, DiagnosticCode::ModuleLoadFailed);
        assert_eq!(warning.path, Some(dir.path().join("a.cmdmod")));
        assert!(outcome.complete);
    }

    #[test]
    fn test_sources_scanned_only_when_modules_yield_nothing() {
        let source = "pub struct SeedCommand;\nimpl Command for SeedCommand {}\n";

        let with_module = tree(&[("app.cmdmod", &module_json(&["FooCommand"])), ("seed.rs", source)]);
        let outcome = discovery().discover(with_module.path());
        assert_eq!(outcome.heuristic().count(), 0);

        let without_module = tree(&[("seed.rs", source), ("nested/other.rs", "fn helper() {}\n")]);
        let outcome = discovery().discover(without_module.path());
        let hints: Vec<_> = outcome.heuristic().map(|c| c.name.as_str()).collect();
        assert_eq!(hints, vec!["seed"]);
        assert!(!outcome.commands[0].is_activatable());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].severity, Severity::Info);
        assert_eq!(outcome.diagnostics[0].code, DiagnosticCode::SourceOnlyCommands);
        assert!(outcome.diagnostics[0].message.starts_with("1 command type(s)"));
    }

    #[test]
    fn test_order_is_by_path() {
        let dir = tree(&[
            ("b/serve.rs", "struct ServeCommand;\nimpl Command for ServeCommand {}\n"),
            ("a/migrate.rs", "struct MigrateCommand;\nimpl Command for MigrateCommand {}\n"),
        ]);
        let names: Vec<_> = discovery()
            .discover(dir.path())
            .commands
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["migrate", "serve"]);
    }

    #[test]
    fn test_duplicates_first_wins() {
        let dir = tree(&[
            ("a.cmdmod", &module_json(&["FooCommand"])),
            ("b.cmdmod", &module_json(&["other::FooCommand"])),
        ]);
        let outcome = discovery().discover(dir.path());
        assert_eq!(outcome.commands.len(), 1);
        assert_eq!(outcome.commands[0].source, Some(dir.path().join("a.cmdmod")));
    }

    #[test]
    fn test_file_budget_marks_incomplete() {
        let dir = tree(&[
            ("a.cmdmod", &module_json(&["FooCommand"])),
            ("b.cmdmod", &module_json(&["BarCommand"])),
        ]);
        let limits = DiscoveryConfiguration {
            max_files: 1,
            timeout_ms: 60_000,
        };
        let outcome = discovery().with_limits(limits).discover(dir.path());

        assert!(!outcome.complete);
        assert_eq!(outcome.commands.len(), 1);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].code, DiagnosticCode::DiscoveryIncomplete);
    }

    #[test]
    fn test_deadline_bounds_enumeration() {
        let dir = tree(&[("a.cmdmod", &module_json(&["FooCommand"]))]);
        let limits = DiscoveryConfiguration {
            max_files: 100,
            timeout_ms: 0,
        };
        let outcome = discovery().with_limits(limits).discover(dir.path());

        assert!(!outcome.complete);
        assert!(outcome.commands.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].message.contains("time limit"));
    }
}
