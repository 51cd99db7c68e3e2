//! Configuration file loader with default merging

use super::normalize::normalize_keys;
use artisan_domain::{ArtisanConfiguration, Diagnostic, DiagnosticCode};
use figment::{Figment, providers::Serialized};
use jsonc_parser::ParseOptions;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Recognised file names, in lookup order
pub const CONFIG_FILE_NAMES: [&str; 3] = ["artisan.json", "rust-artisan.json", ".artisan.json"];

/// File written by [`ConfigLoader::save`]
pub const DEFAULT_CONFIG_FILE: &str = "artisan.json";

/// Errors while reading or writing a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Syntax(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("Could not serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A configuration plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfiguration {
    pub configuration: ArtisanConfiguration,
    /// File the values were read from (`None` for built-in defaults)
    pub source: Option<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadedConfiguration {
    /// Built-in defaults, no source file
    pub fn defaults() -> Self {
        Self {
            configuration: ArtisanConfiguration::default(),
            source: None,
            diagnostics: Vec::new(),
        }
    }
}

/// Loads and saves `artisan.json`
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the project configuration from `project_root`.
    ///
    /// The first of [`CONFIG_FILE_NAMES`] that exists is read and merged over
    /// the defaults. A missing file yields defaults; an unreadable or
    /// malformed one yields defaults plus a warning.
    pub fn load(project_root: &Path) -> LoadedConfiguration {
        let Some(path) = Self::project_config_path(project_root) else {
            debug!(root = %project_root.display(), "No configuration file, using defaults");
            return LoadedConfiguration::defaults();
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => {
                let error = ConfigError::Read {
                    path: path.clone(),
                    source,
                };
                return Self::fallback(DiagnosticCode::ConfigUnreadable, &path, &error);
            }
        };

        match Self::parse(&text) {
            Ok(configuration) => {
                debug!(path = %path.display(), "Loaded configuration");
                LoadedConfiguration {
                    configuration,
                    source: Some(path),
                    diagnostics: Vec::new(),
                }
            }
            Err(error) => Self::fallback(DiagnosticCode::ConfigMalformed, &path, &error),
        }
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> LoadedConfiguration {
        LoadedConfiguration::defaults()
    }

    /// Parse configuration text and merge it over the defaults.
    ///
    /// Comments and trailing commas are accepted; field names are matched
    /// case-insensitively. Empty text is the same as `{}`.
    pub fn parse(text: &str) -> Result<ArtisanConfiguration, ConfigError> {
        let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
            .map_err(|e| ConfigError::Syntax(e.to_string()))?;

        let mut figment = Figment::from(Serialized::defaults(ArtisanConfiguration::default()));
        if let Some(value) = value {
            figment = figment.merge(Serialized::defaults(normalize_keys(value)));
        }

        figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Write `configuration` as pretty-printed JSON to `artisan.json`
    /// under `project_root`, returning the written path.
    pub fn save(project_root: &Path, configuration: &ArtisanConfiguration) -> Result<PathBuf, ConfigError> {
        let path = project_root.join(DEFAULT_CONFIG_FILE);
        let mut json = serde_json::to_string_pretty(configuration)?;
        json.push('\n');
        fs::write(&path, json).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Saved configuration");
        Ok(path)
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path(project_root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file())
    }

    fn fallback(code: DiagnosticCode, path: &Path, error: &ConfigError) -> LoadedConfiguration {
        debug!(path = %path.display(), error = %error, "Falling back to default configuration");
        LoadedConfiguration {
            configuration: ArtisanConfiguration::default(),
            source: None,
            diagnostics: vec![
                Diagnostic::warning(code, format!("{error}; using default configuration"))
                    .with_path(path),
            ],
        }
    }
}
