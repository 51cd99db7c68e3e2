//! Project detector port
//!
//! Classifies a project directory. Implementations never fail: anything
//! that cannot be inspected degrades the context and is reported as a
//! diagnostic.

use artisan_domain::{Diagnostic, ProjectContext};
use std::path::Path;

/// Result of inspecting a project directory
#[derive(Debug, Clone, Default)]
pub struct DetectionOutcome {
    pub context: ProjectContext,
    pub diagnostics: Vec<Diagnostic>,
}

impl DetectionOutcome {
    pub fn new(context: ProjectContext) -> Self {
        Self {
            context,
            diagnostics: Vec::new(),
        }
    }
}

/// Port for project classification
pub trait ProjectDetectorPort {
    /// Inspect `project_path` and classify it
    fn detect(&self, project_path: &Path) -> DetectionOutcome;
}
