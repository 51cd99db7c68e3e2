//! `config:publish`: write the default configuration file

use artisan_domain::{ArtisanConfiguration, Command, CommandError, CommandInstance, CommandRegistration, ExitStatus};
use artisan_infrastructure::{ConfigLoader, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use tracing::info;

/// Writes `artisan.json` with default settings
#[derive(Debug, Clone)]
pub struct ConfigPublishCommand {
    project_root: PathBuf,
}

impl ConfigPublishCommand {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Write the defaults unless a file exists and `force` is off
    pub fn publish(&self, force: bool) -> Result<PathBuf, CommandError> {
        let target = self.project_root.join(DEFAULT_CONFIG_FILE);
        if target.exists() && !force {
            return Err(CommandError::Failed(format!(
                "{} already exists (use --force to overwrite)",
                target.display()
            )));
        }
        ConfigLoader::save(&self.project_root, &ArtisanConfiguration::default())
            .map_err(|e| CommandError::Failed(e.to_string()))
    }
}

impl Default for ConfigPublishCommand {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl Command for ConfigPublishCommand {
    fn description(&self) -> &str {
        "Publish the default artisan.json configuration file"
    }

    fn examples(&self) -> Vec<Vec<String>> {
        vec![
            vec!["config:publish".to_string()],
            vec!["config:publish".to_string(), "--force".to_string()],
        ]
    }

    fn execute(&self, args: &[String]) -> Result<ExitStatus, CommandError> {
        let mut force = false;
        for arg in args {
            match arg.as_str() {
                "--force" | "-f" => force = true,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unexpected argument '{other}'"
                    )));
                }
            }
        }

        let path = self.publish(force)?;
        info!(path = %path.display(), "Published configuration");
        println!("Configuration written to {}", path.display());
        Ok(0)
    }
}

fn create_config_publish() -> CommandInstance {
    Box::new(ConfigPublishCommand::default())
}

artisan_domain::inventory::submit! {
    CommandRegistration::new("ConfigPublishCommand", create_config_publish)
}
