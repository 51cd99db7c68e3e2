//! Build command table use case
//!
//! This module provides the [`ArtisanBuilder`], which turns the host's
//! explicit registrations plus whatever discovery finds into the final,
//! conflict-resolved command table and registers it with a dispatcher.
//!
//! # Overview
//!
//! 1. **Detect** - classify the project (picks the default discovery path)
//! 2. **Explicit** - insert host registrations in order; a later registration
//!    with the same name replaces the earlier one in place
//! 3. **Discover** - scan the resolved path (skipped when discovery is
//!    disabled) and insert discovered entries only for names not taken yet
//! 4. **Register** - activate each entry and hand it to the dispatcher, in
//!    table order; an entry that fails is left out with a warning
//!
//! Heuristic (source-only) discoveries never reach the dispatcher. They are
//! returned as [`BuildReport::hints`].
//!
//! # Usage
//!
//! ```ignore
//! use artisan_application::{ArtisanBuilder, ExplicitRegistration};
//!
//! let report = ArtisanBuilder::new(detector, discovery, "/path/to/project")
//!     .with_configuration(config)
//!     .add_registration(
//!         ExplicitRegistration::of::<MakeModelCommand>()
//!             .named("make:model")
//!             .with_description("Makes a new database model.")
//!             .with_example(["make:model", "Person"]),
//!     )
//!     .build(&mut dispatcher);
//!
//! for diagnostic in &report.diagnostics {
//!     tracing::warn!("{}", diagnostic);
//! }
//! ```

use crate::ports::command_discovery::CommandDiscoveryPort;
use crate::ports::dispatcher::{DispatchEntry, DispatcherPort};
use crate::ports::project_detector::ProjectDetectorPort;
use artisan_domain::{
    ArtisanConfiguration, Command, CommandDescriptor, CommandFactory, CommandOrigin, CommandTable,
    Diagnostic, DiagnosticCode, ProjectContext, resolve_alias,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// One explicit registration supplied by the host
#[derive(Debug, Clone)]
pub struct ExplicitRegistration {
    factory: CommandFactory,
    name: Option<String>,
    description: Option<String>,
    examples: Vec<Vec<String>>,
}

impl ExplicitRegistration {
    pub fn new(factory: CommandFactory) -> Self {
        Self {
            factory,
            name: None,
            description: None,
            examples: Vec::new(),
        }
    }

    /// Registration for a `Default`-constructible command type
    pub fn of<T>() -> Self
    where
        T: Command + Default + 'static,
    {
        Self::new(CommandFactory::of::<T>())
    }

    /// Dispatch under `name` instead of the derived name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_example<I, S>(mut self, example: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples
            .push(example.into_iter().map(Into::into).collect());
        self
    }

    fn to_descriptor(&self) -> CommandDescriptor {
        let mut descriptor = CommandDescriptor::explicit(self.factory.clone(), self.name.as_deref());
        if let Some(description) = &self.description {
            descriptor.description = description.clone();
        }
        descriptor.examples = self.examples.clone();
        descriptor
    }
}

/// Everything one build produced
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub context: ProjectContext,
    /// Entries that were registered with the dispatcher, in table order
    pub table: CommandTable,
    /// Source-only discoveries whose names are not in the table
    pub hints: Vec<CommandDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
    /// Directory discovery ran against (`None` when discovery was disabled)
    pub discovery_path: Option<PathBuf>,
    pub discovery_complete: bool,
    aliases: BTreeMap<String, String>,
}

impl BuildReport {
    /// Resolve a typed token to a canonical command name
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        resolve_alias(&self.aliases, token)
    }

    /// Aliases pointing at `canonical`, sorted
    pub fn aliases_for(&self, canonical: &str) -> Vec<&str> {
        self.aliases
            .iter()
            .filter(|(_, target)| target.as_str() == canonical)
            .map(|(alias, _)| alias.as_str())
            .collect()
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Names in table order
    pub fn names(&self) -> Vec<&str> {
        self.table.names()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Merged table before activation
struct MergeResult {
    context: ProjectContext,
    table: CommandTable,
    hints: Vec<CommandDescriptor>,
    diagnostics: Vec<Diagnostic>,
    discovery_path: Option<PathBuf>,
    discovery_complete: bool,
}

/// Builder that produces the final command table
pub struct ArtisanBuilder<D: ProjectDetectorPort, C: CommandDiscoveryPort> {
    detector: Arc<D>,
    discovery: Arc<C>,
    project_path: PathBuf,
    configuration: ArtisanConfiguration,
    registrations: Vec<ExplicitRegistration>,
    discovery_path: Option<PathBuf>,
}

impl<D: ProjectDetectorPort, C: CommandDiscoveryPort> ArtisanBuilder<D, C> {
    pub fn new(detector: D, discovery: C, project_path: impl Into<PathBuf>) -> Self {
        Self::with_shared(Arc::new(detector), Arc::new(discovery), project_path)
    }

    pub fn with_shared(detector: Arc<D>, discovery: Arc<C>, project_path: impl Into<PathBuf>) -> Self {
        Self {
            detector,
            discovery,
            project_path: project_path.into(),
            configuration: ArtisanConfiguration::default(),
            registrations: Vec::new(),
            discovery_path: None,
        }
    }

    pub fn with_configuration(mut self, configuration: ArtisanConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Register a command type, optionally under an explicit name
    pub fn add_command<T>(self, name: Option<&str>) -> Self
    where
        T: Command + Default + 'static,
    {
        let registration = ExplicitRegistration::of::<T>();
        match name {
            Some(name) => self.add_registration(registration.named(name)),
            None => self.add_registration(registration),
        }
    }

    pub fn add_registration(mut self, registration: ExplicitRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Scan `path` instead of the configured commands path
    pub fn use_command_discovery(mut self, path: impl Into<PathBuf>) -> Self {
        self.discovery_path = Some(path.into());
        self.configuration.enable_command_discovery = true;
        self
    }

    pub fn without_discovery(mut self) -> Self {
        self.configuration.enable_command_discovery = false;
        self
    }

    /// Directory discovery scans for `context`.
    ///
    /// Priority: [`use_command_discovery`](Self::use_command_discovery),
    /// then the configured `commandsPath`, then the project type default.
    /// Relative paths are resolved against the project path.
    pub fn resolve_discovery_path(&self, context: &ProjectContext) -> PathBuf {
        let relative = match &self.discovery_path {
            Some(path) => path.clone(),
            None if !self.configuration.commands_path.trim().is_empty() => {
                PathBuf::from(self.configuration.commands_path.trim())
            }
            None => PathBuf::from(context.project_type.default_commands_path()),
        };
        context.resolve_path(relative)
    }

    /// Detect, merge explicit and discovered entries, and register the
    /// result with `dispatcher`.
    pub fn build<P: DispatcherPort + ?Sized>(self, dispatcher: &mut P) -> BuildReport {
        let merged = self.merge();
        let mut diagnostics = merged.diagnostics;
        let mut table = CommandTable::new();

        for mut descriptor in merged.table.into_vec() {
            let command = match descriptor.handle.activate() {
                Ok(command) => command,
                Err(e) => {
                    debug!(command = %descriptor.name, error = %e, "Activation failed");
                    diagnostics.push(activation_diagnostic(&descriptor, e.to_string()));
                    continue;
                }
            };

            if descriptor.description.is_empty() {
                descriptor.description = command.description().to_string();
            }
            if descriptor.examples.is_empty() {
                descriptor.examples = command.examples();
            }

            let entry = DispatchEntry {
                name: descriptor.name.clone(),
                description: descriptor.description.clone(),
                examples: descriptor.examples.clone(),
                command,
            };

            match dispatcher.register(entry) {
                Ok(()) => {
                    trace!(command = %descriptor.name, origin = %descriptor.origin, "Registered command");
                    table.insert_if_absent(descriptor);
                }
                Err(e) => {
                    debug!(command = %descriptor.name, error = %e, "Dispatcher rejected command");
                    let mut diagnostic = Diagnostic::warning(
                        DiagnosticCode::RegistrationRejected,
                        format!("Could not register command '{}': {}", descriptor.name, e),
                    );
                    if let Some(source) = &descriptor.source {
                        diagnostic = diagnostic.with_path(source);
                    }
                    diagnostics.push(diagnostic);
                }
            }
        }

        info!(
            commands = table.len(),
            hints = merged.hints.len(),
            warnings = diagnostics.iter().filter(|d| d.is_warning()).count(),
            "Command table built"
        );

        BuildReport {
            context: merged.context,
            table,
            hints: merged.hints,
            diagnostics,
            discovery_path: merged.discovery_path,
            discovery_complete: merged.discovery_complete,
            aliases: self.configuration.aliases,
        }
    }

    fn merge(&self) -> MergeResult {
        let detection = self.detector.detect(&self.project_path);
        let context = detection.context;
        let mut diagnostics = detection.diagnostics;
        debug!(
            project_type = %context.project_type,
            manifest = ?context.manifest_path,
            "Project detected"
        );

        let mut table = CommandTable::new();
        for registration in &self.registrations {
            let descriptor = registration.to_descriptor();
            let name = descriptor.name.clone();
            if table.upsert(descriptor).is_some() {
                debug!(command = %name, "Explicit registration replaced an earlier one");
            }
        }

        let mut hints: Vec<CommandDescriptor> = Vec::new();
        let mut discovery_path = None;
        let mut discovery_complete = true;

        if self.configuration.enable_command_discovery {
            let path = self.resolve_discovery_path(&context);
            debug!(path = %path.display(), "Discovering commands");

            let outcome = self.discovery.discover(&path);
            diagnostics.extend(outcome.diagnostics);
            discovery_complete = outcome.complete;

            let (heuristic, compiled): (Vec<_>, Vec<_>) = outcome
                .commands
                .into_iter()
                .partition(|c| c.origin == CommandOrigin::DiscoveredHeuristic);

            for descriptor in compiled {
                let name = descriptor.name.clone();
                if !table.insert_if_absent(descriptor) {
                    trace!(command = %name, "Discovered command shadowed by existing entry");
                }
            }

            for hint in heuristic {
                if table.contains(&hint.name) || hints.iter().any(|h| h.name == hint.name) {
                    trace!(command = %hint.name, "Source hint shadowed by existing entry");
                    continue;
                }
                hints.push(hint);
            }

            discovery_path = Some(path);
        } else {
            debug!("Command discovery disabled");
        }

        MergeResult {
            context,
            table,
            hints,
            diagnostics,
            discovery_path,
            discovery_complete,
        }
    }
}

fn activation_diagnostic(descriptor: &CommandDescriptor, reason: String) -> Diagnostic {
    let diagnostic = Diagnostic::warning(
        DiagnosticCode::ActivationFailed,
        format!("Could not activate command '{}': {}", descriptor.name, reason),
    );
    match &descriptor.source {
        Some(source) => diagnostic.with_path(source),
        None => diagnostic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::command_discovery::{DiscoveryOutcome, NoDiscovery};
    use crate::ports::dispatcher::{DispatchError, RegistrationError};
    use crate::ports::project_detector::DetectionOutcome;
    use artisan_domain::{
        ActivationError, CommandError, CommandHandle, ExitStatus, ProjectType, UnresolvedReason,
        validate_command_name,
    };
    use std::cell::RefCell;
    use std::path::Path;

    // ==================== Fakes ====================

    struct FixedDetector(ProjectType);

    impl ProjectDetectorPort for FixedDetector {
        fn detect(&self, project_path: &Path) -> DetectionOutcome {
            let mut context = ProjectContext::generic(project_path);
            context.project_type = self.0;
            DetectionOutcome::new(context)
        }
    }

    /// Returns a canned outcome and remembers the path it was asked about
    struct CannedDiscovery {
        outcome: DiscoveryOutcome,
        asked: RefCell<Vec<PathBuf>>,
    }

    impl CannedDiscovery {
        fn new(commands: Vec<CommandDescriptor>) -> Self {
            Self {
                outcome: DiscoveryOutcome {
                    commands,
                    ..DiscoveryOutcome::empty()
                },
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandDiscoveryPort for CannedDiscovery {
        fn discover(&self, path: &Path) -> DiscoveryOutcome {
            self.asked.borrow_mut().push(path.to_path_buf());
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct RecordingDispatcher {
        entries: Vec<DispatchEntry>,
    }

    impl DispatcherPort for RecordingDispatcher {
        fn register(&mut self, entry: DispatchEntry) -> Result<(), RegistrationError> {
            validate_command_name(&entry.name)?;
            if self.entries.iter().any(|e| e.name == entry.name) {
                return Err(RegistrationError::AlreadyRegistered(entry.name));
            }
            self.entries.push(entry);
            Ok(())
        }

        fn registered_names(&self) -> Vec<String> {
            self.entries.iter().map(|e| e.name.clone()).collect()
        }

        fn dispatch(&self, args: &[String]) -> Result<ExitStatus, DispatchError> {
            let name = args.first().ok_or(DispatchError::NoCommand)?;
            let entry = self
                .entries
                .iter()
                .find(|e| &e.name == name)
                .ok_or_else(|| DispatchError::UnknownCommand(name.clone()))?;
            entry
                .command
                .execute(&args[1..])
                .map_err(|source| DispatchError::Command {
                    name: name.clone(),
                    source,
                })
        }
    }

    #[derive(Default)]
    struct AlphaCommand;

    impl Command for AlphaCommand {
        fn description(&self) -> &str {
            "alpha from the instance"
        }

        fn execute(&self, _args: &[String]) -> Result<ExitStatus, CommandError> {
            Ok(0)
        }
    }

    #[derive(Default)]
    struct BetaCommand;

    impl Command for BetaCommand {
        fn execute(&self, args: &[String]) -> Result<ExitStatus, CommandError> {
            Ok(args.len() as ExitStatus)
        }
    }

    fn compiled(type_name: &str) -> CommandDescriptor {
        let factory = CommandFactory::new(type_name, || Ok(Box::new(BetaCommand)));
        CommandDescriptor::compiled(CommandHandle::resolved(factory), "target/app.cmdmod")
    }

    fn builder<C: CommandDiscoveryPort>(discovery: C) -> ArtisanBuilder<FixedDetector, C> {
        ArtisanBuilder::new(FixedDetector(ProjectType::Console), discovery, "/project")
    }

    // ==================== End-to-end ====================

    #[test]
    fn test_two_explicit_registrations_keep_order() {
        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(NoDiscovery)
            .add_command::<AlphaCommand>(Some("alpha"))
            .add_command::<BetaCommand>(Some("beta"))
            .build(&mut dispatcher);

        assert_eq!(report.names(), vec!["alpha", "beta"]);
        assert_eq!(dispatcher.registered_names(), vec!["alpha", "beta"]);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_single_compiled_command_is_registered() {
        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(CannedDiscovery::new(vec![compiled("FooCommand")])).build(&mut dispatcher);

        assert_eq!(report.names(), vec!["foo"]);
        assert_eq!(
            report.table.get("foo").unwrap().origin,
            CommandOrigin::DiscoveredCompiled
        );
    }

    #[test]
    fn test_explicit_wins_over_compiled() {
        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(CannedDiscovery::new(vec![compiled("FooCommand")]))
            .add_command::<AlphaCommand>(Some("foo"))
            .build(&mut dispatcher);

        assert_eq!(report.names(), vec!["foo"]);
        let entry = report.table.get("foo").unwrap();
        assert_eq!(entry.origin, CommandOrigin::Explicit);
        assert_eq!(entry.description, "alpha from the instance");
    }

    // ==================== Merge rules ====================

    #[test]
    fn test_later_explicit_registration_wins_in_place() {
        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(NoDiscovery)
            .add_registration(
                ExplicitRegistration::of::<AlphaCommand>()
                    .named("deploy")
                    .with_description("first"),
            )
            .add_command::<BetaCommand>(Some("status"))
            .add_registration(
                ExplicitRegistration::of::<BetaCommand>()
                    .named("deploy")
                    .with_description("second"),
            )
            .build(&mut dispatcher);

        assert_eq!(report.names(), vec!["deploy", "status"]);
        assert_eq!(report.table.get("deploy").unwrap().description, "second");
        // The replacing registration is the one the dispatcher runs
        let args = vec!["deploy".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dispatcher.dispatch(&args).unwrap(), 2);
    }

    #[test]
    fn test_derived_names_for_explicit_registrations() {
        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(NoDiscovery)
            .add_command::<AlphaCommand>(None)
            .add_command::<BetaCommand>(None)
            .build(&mut dispatcher);
        assert_eq!(report.names(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_first_compiled_wins_within_tier() {
        let mut first = compiled("FooCommand").with_description("first");
        first.source = Some(PathBuf::from("a.cmdmod"));
        let second = compiled("other::FooCommand").with_description("second");

        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(CannedDiscovery::new(vec![first, second])).build(&mut dispatcher);

        assert_eq!(report.names(), vec!["foo"]);
        assert_eq!(report.table.get("foo").unwrap().description, "first");
    }

    #[test]
    fn test_heuristic_entries_become_hints_only() {
        let discovery = CannedDiscovery::new(vec![
            CommandDescriptor::heuristic("SeedCommand", "src/console/commands/seed.rs"),
            CommandDescriptor::heuristic("AlphaCommand", "src/console/commands/alpha.rs"),
        ]);
        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(discovery)
            .add_command::<AlphaCommand>(None)
            .build(&mut dispatcher);

        assert_eq!(report.names(), vec!["alpha"]);
        assert_eq!(dispatcher.registered_names(), vec!["alpha"]);
        let hint_names: Vec<_> = report.hints.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(hint_names, vec!["seed"]);
    }

    #[test]
    fn test_discovery_disabled_skips_scan() {
        let discovery = Arc::new(CannedDiscovery::new(vec![compiled("FooCommand")]));
        let mut dispatcher = RecordingDispatcher::default();
        let report = ArtisanBuilder::with_shared(
            Arc::new(FixedDetector(ProjectType::Console)),
            discovery.clone(),
            "/project",
        )
        .without_discovery()
        .build(&mut dispatcher);

        assert!(report.table.is_empty());
        assert!(report.discovery_path.is_none());
        assert!(discovery.asked.borrow().is_empty());
    }

    // ==================== Discovery path ====================

    #[test]
    fn test_discovery_path_priority() {
        let context = ProjectContext {
            project_type: ProjectType::Library,
            ..ProjectContext::generic("/project")
        };

        let explicit = builder(NoDiscovery).use_command_discovery("tools/cmds");
        assert_eq!(
            explicit.resolve_discovery_path(&context),
            PathBuf::from("/project/tools/cmds")
        );

        let configured = builder(NoDiscovery);
        assert_eq!(
            configured.resolve_discovery_path(&context),
            PathBuf::from("/project/src/console/commands")
        );

        let mut config = ArtisanConfiguration::default();
        config.commands_path = String::new();
        let by_type = builder(NoDiscovery).with_configuration(config);
        assert_eq!(
            by_type.resolve_discovery_path(&context),
            PathBuf::from("/project/src/commands")
        );
    }

    #[test]
    fn test_discovery_runs_against_resolved_path() {
        let discovery = Arc::new(CannedDiscovery::new(Vec::new()));
        let mut dispatcher = RecordingDispatcher::default();
        let report = ArtisanBuilder::with_shared(
            Arc::new(FixedDetector(ProjectType::Console)),
            discovery.clone(),
            "/project",
        )
        .use_command_discovery("cmds")
        .build(&mut dispatcher);

        assert_eq!(
            discovery.asked.borrow().as_slice(),
            &[PathBuf::from("/project/cmds")]
        );
        assert_eq!(report.discovery_path, Some(PathBuf::from("/project/cmds")));
    }

    // ==================== Failure isolation ====================

    #[test]
    fn test_activation_failure_drops_only_that_entry() {
        let not_linked = CommandDescriptor::compiled(
            CommandHandle::unresolved("GhostCommand", UnresolvedReason::NotLinked),
            "target/ghost.cmdmod",
        );
        let broken = ExplicitRegistration::new(CommandFactory::new("BrokenCommand", || {
            Err(ActivationError::Construction {
                type_name: "BrokenCommand".to_string(),
                reason: "no database".to_string(),
            })
        }));

        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(CannedDiscovery::new(vec![not_linked, compiled("FooCommand")]))
            .add_registration(broken)
            .add_command::<AlphaCommand>(None)
            .build(&mut dispatcher);

        assert_eq!(report.names(), vec!["alpha", "foo"]);
        let codes: Vec<_> = report.warnings().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![DiagnosticCode::ActivationFailed, DiagnosticCode::ActivationFailed]
        );
        assert!(report.diagnostics[1].path.is_some());
    }

    #[test]
    fn test_dispatcher_rejection_is_a_warning() {
        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(NoDiscovery)
            .add_command::<AlphaCommand>(Some("bad name"))
            .add_command::<BetaCommand>(Some("beta"))
            .build(&mut dispatcher);

        assert_eq!(report.names(), vec!["beta"]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].code, DiagnosticCode::RegistrationRejected);
    }

    // ==================== Aliases ====================

    #[test]
    fn test_resolve_uses_configured_aliases() {
        let mut config = ArtisanConfiguration::default();
        config.aliases.insert("a".to_string(), "alpha".to_string());

        let mut dispatcher = RecordingDispatcher::default();
        let report = builder(NoDiscovery)
            .with_configuration(config)
            .add_command::<AlphaCommand>(None)
            .build(&mut dispatcher);

        assert_eq!(report.resolve("a"), "alpha");
        assert_eq!(report.resolve("alpha"), "alpha");
        assert_eq!(report.resolve("zzz"), "zzz");
        assert_eq!(report.aliases_for("alpha"), vec!["a"]);
    }
}
