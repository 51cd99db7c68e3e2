//! `about`: print what kind of project the root directory holds

use artisan_application::ProjectDetectorPort;
use artisan_domain::{Command, CommandError, CommandInstance, CommandRegistration, ExitStatus};
use artisan_infrastructure::FsProjectDetector;
use artisan_presentation::ConsoleFormatter;
use std::path::PathBuf;

/// Prints the detected project context
#[derive(Debug, Clone)]
pub struct AboutCommand {
    project_root: PathBuf,
}

impl AboutCommand {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Text printed by `execute`
    pub fn render(&self) -> String {
        let outcome = FsProjectDetector::new().detect(&self.project_root);
        let mut text = ConsoleFormatter::format_context(&outcome.context);
        text.push_str(&ConsoleFormatter::format_diagnostics(&outcome.diagnostics));
        text
    }
}

impl Default for AboutCommand {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl Command for AboutCommand {
    fn description(&self) -> &str {
        "Display information about the current project"
    }

    fn examples(&self) -> Vec<Vec<String>> {
        vec![vec!["about".to_string()]]
    }

    fn execute(&self, args: &[String]) -> Result<ExitStatus, CommandError> {
        if let Some(unexpected) = args.first() {
            return Err(CommandError::InvalidArguments(format!(
                "about takes no arguments, got '{unexpected}'"
            )));
        }
        print!("{}", self.render());
        Ok(0)
    }
}

fn create_about() -> CommandInstance {
    Box::new(AboutCommand::default())
}

artisan_domain::inventory::submit! {
    CommandRegistration::new("AboutCommand", create_about)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_describes_project() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"inventory-app\"\n").unwrap();

        let text = AboutCommand::new(dir.path().to_path_buf()).render();
        assert!(text.contains("library"));
        assert!(text.contains("inventory-app"));
    }

    #[test]
    fn test_rejects_arguments() {
        let err = AboutCommand::default()
            .execute(&["extra".to_string()])
            .unwrap_err();
        assert_eq!(err.exit_status(), 2);
    }
}
