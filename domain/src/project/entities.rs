//! Entities for project context
//!
//! The [`ProjectContext`] is created once per invocation by the detector and
//! is not modified afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::value_objects::PropertyKey;

/// Classification of the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Executable target without a web or worker framework
    Console,
    /// Depends on a web framework
    WebHost,
    /// Depends on a background-job framework
    WorkerService,
    /// Package without an executable target
    Library,
    /// No usable manifest
    #[default]
    Generic,
}

impl ProjectType {
    /// Commands directory used when configuration does not name one
    pub fn default_commands_path(&self) -> &'static str {
        match self {
            ProjectType::Library => "src/commands",
            _ => "src/console/commands",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Console => "console",
            ProjectType::WebHost => "web-host",
            ProjectType::WorkerService => "worker-service",
            ProjectType::Library => "library",
            ProjectType::Generic => "generic",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification and detected features of the host project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectContext {
    pub project_type: ProjectType,

    /// Directory that was inspected
    pub project_path: PathBuf,

    /// Manifest the classification was read from (`None` when absent)
    pub manifest_path: Option<PathBuf>,

    /// Extracted manifest properties, keyed by [`PropertyKey::as_str`]
    pub properties: BTreeMap<String, String>,

    /// A known configuration file exists at the project root
    pub has_configuration_files: bool,

    /// Some source file references a database connection type
    pub has_data_context: bool,

    /// Package identifiers from the lock file and manifest dependency tables
    pub available_packages: BTreeSet<String>,
}

impl ProjectContext {
    /// Context for a directory without a manifest
    pub fn generic(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            ..Self::default()
        }
    }

    pub fn property(&self, key: PropertyKey) -> Option<&str> {
        self.properties.get(key.as_str()).map(String::as_str)
    }

    /// Resolve `relative` against the project path (absolute paths pass through)
    pub fn resolve_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_path.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_default_is_generic() {
        assert_eq!(ProjectType::default(), ProjectType::Generic);
    }

    #[test]
    fn test_project_type_display() {
        assert_eq!(ProjectType::WebHost.to_string(), "web-host");
        assert_eq!(ProjectType::WorkerService.to_string(), "worker-service");
        assert_eq!(
            serde_json::to_value(ProjectType::Library).unwrap(),
            serde_json::json!("library")
        );
    }

    #[test]
    fn test_default_commands_path() {
        assert_eq!(ProjectType::Library.default_commands_path(), "src/commands");
        assert_eq!(
            ProjectType::Console.default_commands_path(),
            "src/console/commands"
        );
        assert_eq!(
            ProjectType::Generic.default_commands_path(),
            "src/console/commands"
        );
    }

    #[test]
    fn test_generic_context() {
        let ctx = ProjectContext::generic("/tmp/project");
        assert_eq!(ctx.project_type, ProjectType::Generic);
        assert!(ctx.manifest_path.is_none());
        assert!(ctx.property(PropertyKey::Name).is_none());
        assert_eq!(
            ctx.resolve_path("src/console/commands"),
            PathBuf::from("/tmp/project/src/console/commands")
        );
    }

    #[test]
    fn test_property_lookup() {
        let mut ctx = ProjectContext::generic("/p");
        ctx.properties
            .insert(PropertyKey::Edition.as_str().to_string(), "2021".to_string());
        ctx.available_packages.insert("serde".to_string());
        assert_eq!(ctx.property(PropertyKey::Edition), Some("2021"));
        assert!(ctx.available_packages.contains("serde"));
    }
}
