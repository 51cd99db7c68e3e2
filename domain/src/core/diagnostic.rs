//! Structured diagnostics emitted by the pipeline.
//!
//! Library code never prints. Every recoverable failure (unreadable config,
//! broken command module, command that cannot be activated) becomes a
//! [`Diagnostic`] returned next to the outcome, and the caller decides
//! whether to log, print or ignore it.
//!
//! # Examples
//!
//! ```
//! use artisan_domain::{Diagnostic, DiagnosticCode, Severity};
//!
//! let diagnostic = Diagnostic::warning(
//!     DiagnosticCode::ModuleLoadFailed,
//!     "Could not load command module: unexpected end of input",
//! )
//! .with_path("target/commands/app.cmdmod");
//!
//! assert_eq!(diagnostic.severity, Severity::Warning);
//! assert!(diagnostic.to_string().contains("app.cmdmod"));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Severity level of a diagnostic.
///
/// There is no error level: nothing in the pipeline is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational: something worth knowing, no behaviour was lost.
    Info,
    /// Non-fatal: an entry or a file was skipped.
    Warning,
}

/// Identifies a specific diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
    /// A configuration file exists but could not be read.
    ConfigUnreadable,
    /// A configuration file could not be parsed; defaults were used.
    ConfigMalformed,
    /// A project manifest exists but could not be read or parsed.
    ManifestUnreadable,
    /// A command module could not be loaded and was skipped.
    ModuleLoadFailed,
    /// A source file could not be read during the heuristic scan.
    SourceUnreadable,
    /// Discovery ran out of budget before visiting every file.
    DiscoveryIncomplete,
    /// Command types were found in source files but in no command module.
    SourceOnlyCommands,
    /// A command could not be instantiated and was left out of the table.
    ActivationFailed,
    /// The dispatcher refused a command and it was left out of the table.
    RegistrationRejected,
}

impl DiagnosticCode {
    /// Short stable identifier, handy for structured logging
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::ConfigUnreadable => "config-unreadable",
            DiagnosticCode::ConfigMalformed => "config-malformed",
            DiagnosticCode::ManifestUnreadable => "manifest-unreadable",
            DiagnosticCode::ModuleLoadFailed => "module-load-failed",
            DiagnosticCode::SourceUnreadable => "source-unreadable",
            DiagnosticCode::DiscoveryIncomplete => "discovery-incomplete",
            DiagnosticCode::SourceOnlyCommands => "source-only-commands",
            DiagnosticCode::ActivationFailed => "activation-failed",
            DiagnosticCode::RegistrationRejected => "registration-rejected",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable problem detected while running the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    /// File the diagnostic refers to, when there is one
    pub path: Option<PathBuf>,
}

impl Diagnostic {
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn info(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {} ({})", self.code, self.message, path.display()),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}
