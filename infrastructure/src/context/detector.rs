//! Filesystem project detector
//!
//! This module provides the [`FsProjectDetector`] implementation of
//! [`ProjectDetectorPort`] that classifies a Cargo project from its files.
//!
//! # Overview
//!
//! Detection runs these steps against the project root:
//!
//! 1. **Manifest** - pick the root-level `*.toml` with a `[package]` or
//!    `[workspace]` header (non-test names first, then by file name)
//! 2. **Classify** - web framework, then job framework, then executable
//!    package (Console) or plain package (Library); anything else is Generic
//! 3. **Properties** - `name`, `version`, `edition`, `rust-version`,
//!    `lib-name` read with `toml`
//! 4. **Features** - configuration files, database connection types in
//!    `*.rs` sources, package identifiers from `Cargo.lock` and the manifest
//!
//! Feature scans run whether or not a manifest was found.
//!
//! # Example
//!
//! ```ignore
//! use artisan_application::ProjectDetectorPort;
//! use artisan_infrastructure::FsProjectDetector;
//! use std::path::Path;
//!
//! let outcome = FsProjectDetector::new().detect(Path::new("."));
//! println!("{} project", outcome.context.project_type);
//! ```

use super::markers::{
    self, CONFIGURATION_FILES, DATA_CONTEXT_MARKERS, DEPENDENCY_TABLES, TEST_MARKER, WEB_FRAMEWORKS,
    WORKER_FRAMEWORKS,
};
use crate::walk::files_with_extension;
use artisan_application::{DetectionOutcome, ProjectDetectorPort};
use artisan_domain::{Diagnostic, DiagnosticCode, ProjectContext, ProjectType, PropertyKey};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Project detector that reads from the local file system.
///
/// Never fails: unreadable files are skipped and reported as diagnostics.
#[derive(Debug, Clone, Default)]
pub struct FsProjectDetector;

/// The chosen manifest and its text
struct Manifest {
    path: PathBuf,
    text: String,
}

impl FsProjectDetector {
    pub fn new() -> Self {
        Self
    }

    /// Locate the project manifest under `project_root`.
    fn locate_manifest(&self, project_root: &Path, diagnostics: &mut Vec<Diagnostic>) -> Option<Manifest> {
        let entries = match fs::read_dir(project_root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(root = %project_root.display(), error = %e, "Project root is not readable");
                return None;
            }
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        candidates.sort();

        let mut manifests = Vec::new();
        for path in candidates {
            match fs::read_to_string(&path) {
                Ok(text) if markers::has_manifest_header(&text) => manifests.push(Manifest { path, text }),
                Ok(_) => trace!(path = %path.display(), "Not a manifest"),
                Err(e) => diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::ManifestUnreadable,
                        format!("Could not read manifest candidate: {e}"),
                    )
                    .with_path(&path),
                ),
            }
        }

        let preferred = manifests.iter().position(|m| !is_test_manifest(&m.path)).unwrap_or(0);
        if manifests.is_empty() {
            None
        } else {
            Some(manifests.swap_remove(preferred))
        }
    }

    fn classify(&self, project_root: &Path, manifest: &Manifest) -> ProjectType {
        let text = &manifest.text;
        if markers::declares_dependency(text, WEB_FRAMEWORKS) {
            ProjectType::WebHost
        } else if markers::declares_dependency(text, WORKER_FRAMEWORKS) {
            ProjectType::WorkerService
        } else if markers::has_package_header(text) {
            let executable = markers::has_bin_table(text) || project_root.join("src/main.rs").is_file();
            if executable {
                ProjectType::Console
            } else {
                ProjectType::Library
            }
        } else {
            ProjectType::Generic
        }
    }

    /// Known properties and dependency-table keys from a parsed manifest
    fn read_manifest(
        &self,
        manifest: &Manifest,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (BTreeMap<String, String>, BTreeSet<String>) {
        let table: toml::Table = match manifest.text.parse() {
            Ok(table) => table,
            Err(e) => {
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::ManifestUnreadable,
                        format!("Could not parse manifest: {}", e.message()),
                    )
                    .with_path(&manifest.path),
                );
                return (BTreeMap::new(), BTreeSet::new());
            }
        };

        let properties = PropertyKey::all()
            .iter()
            .filter_map(|key| {
                let (section, field) = key.manifest_location();
                let value = table.get(section)?.get(field)?.as_str()?;
                Some((key.as_str().to_string(), value.to_string()))
            })
            .collect();

        let mut packages = BTreeSet::new();
        let workspace = table.get("workspace");
        for source in [Some(&table), workspace.and_then(toml::Value::as_table)]
            .into_iter()
            .flatten()
        {
            for name in DEPENDENCY_TABLES {
                if let Some(dependencies) = source.get(*name).and_then(toml::Value::as_table) {
                    packages.extend(dependencies.keys().cloned());
                }
            }
        }

        (properties, packages)
    }

    fn lock_file_packages(&self, project_root: &Path) -> Vec<String> {
        let path = project_root.join("Cargo.lock");
        match fs::read_to_string(&path) {
            Ok(lock) => markers::lock_file_packages(&lock).map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn has_configuration_files(&self, project_root: &Path) -> bool {
        CONFIGURATION_FILES
            .iter()
            .any(|name| project_root.join(name).is_file())
    }

    /// Whether any `*.rs` file under the root mentions a database type.
    ///
    /// `target/` and hidden directories are skipped.
    fn has_data_context(&self, project_root: &Path) -> bool {
        files_with_extension(project_root, "rs", true)
            .iter()
            .any(|path| match fs::read_to_string(path) {
                Ok(text) => {
                    let found = DATA_CONTEXT_MARKERS.iter().any(|marker| text.contains(marker));
                    if found {
                        trace!(path = %path.display(), "Data context marker found");
                    }
                    found
                }
                Err(e) => {
                    trace!(path = %path.display(), error = %e, "Skipping unreadable source");
                    false
                }
            })
    }
}

impl ProjectDetectorPort for FsProjectDetector {
    fn detect(&self, project_root: &Path) -> DetectionOutcome {
        let mut diagnostics = Vec::new();
        let mut context = ProjectContext::generic(project_root);

        if let Some(manifest) = self.locate_manifest(project_root, &mut diagnostics) {
            context.project_type = self.classify(project_root, &manifest);
            let (properties, packages) = self.read_manifest(&manifest, &mut diagnostics);
            context.properties = properties;
            context.available_packages = packages;
            context.manifest_path = Some(manifest.path);
        }

        context
            .available_packages
            .extend(self.lock_file_packages(project_root));
        context.has_configuration_files = self.has_configuration_files(project_root);
        context.has_data_context = self.has_data_context(project_root);

        debug!(
            project_type = %context.project_type,
            packages = context.available_packages.len(),
            data_context = context.has_data_context,
            "Detected project"
        );

        DetectionOutcome {
            context,
            diagnostics,
        }
    }
}

fn is_test_manifest(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().contains(TEST_MARKER))
        .unwrap_or(false)
}
