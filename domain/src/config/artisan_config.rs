use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default discovery directory, relative to the project root
pub const DEFAULT_COMMANDS_PATH: &str = "src/console/commands";

/// Look `token` up in an alias table (alias → canonical name).
///
/// Pure lookup: returns `token` itself when it is not an alias.
pub fn resolve_alias<'a>(aliases: &'a BTreeMap<String, String>, token: &'a str) -> &'a str {
    aliases.get(token).map(String::as_str).unwrap_or(token)
}

/// Settings read from `artisan.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtisanConfiguration {
    /// Directory scanned for commands; empty means "pick from the project type"
    pub commands_path: String,
    pub enable_command_discovery: bool,
    /// Alias → canonical command name
    pub aliases: BTreeMap<String, String>,
    /// Logical area (commands, models, ...) → relative directory
    pub paths: BTreeMap<String, String>,
    /// Extension provider identifiers, in load order
    pub providers: Vec<String>,
    pub logging: LoggingConfiguration,
    pub discovery: DiscoveryConfiguration,
}

impl Default for ArtisanConfiguration {
    fn default() -> Self {
        let paths = [
            ("commands", DEFAULT_COMMANDS_PATH),
            ("models", "src/models"),
            ("controllers", "src/controllers"),
            ("views", "src/views"),
        ]
        .into_iter()
        .map(|(area, dir)| (area.to_string(), dir.to_string()))
        .collect();

        Self {
            commands_path: DEFAULT_COMMANDS_PATH.to_string(),
            enable_command_discovery: true,
            aliases: BTreeMap::new(),
            paths,
            providers: Vec::new(),
            logging: LoggingConfiguration::default(),
            discovery: DiscoveryConfiguration::default(),
        }
    }
}

impl ArtisanConfiguration {
    /// Directory configured for a logical area, or `""` when unknown
    pub fn path(&self, area: &str) -> &str {
        self.paths.get(area).map(String::as_str).unwrap_or("")
    }

    /// Resolve a typed command token to its canonical name.
    ///
    /// Returns `token` unchanged when no alias matches.
    ///
    /// ```
    /// use artisan_domain::ArtisanConfiguration;
    ///
    /// let mut config = ArtisanConfiguration::default();
    /// config.aliases.insert("mm".to_string(), "make:model".to_string());
    ///
    /// assert_eq!(config.resolve_alias("mm"), "make:model");
    /// assert_eq!(config.resolve_alias("make:model"), "make:model");
    /// assert_eq!(config.resolve_alias("other"), "other");
    /// ```
    pub fn resolve_alias<'a>(&'a self, token: &'a str) -> &'a str {
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
}

/// `logging` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfiguration {
    pub level: String,
    pub enable_colors: bool,
    pub enable_timestamps: bool,
}

impl Default for LoggingConfiguration {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_colors: true,
            enable_timestamps: false,
        }
    }
}

impl LoggingConfiguration {
    /// `tracing` filter directive for the configured level.
    ///
    /// Accepts the usual short names as well as long forms such as
    /// `Information` or `Warning`; anything else is passed through so that
    /// full filter expressions (`artisan=debug,warn`) keep working.
    pub fn filter_directive(&self) -> String {
        match self.level.trim().to_lowercase().as_str() {
            "trace" | "verbose" => "trace".to_string(),
            "debug" => "debug".to_string(),
            "" | "info" | "information" => "info".to_string(),
            "warn" | "warning" => "warn".to_string(),
            "error" | "critical" => "error".to_string(),
            "off" | "none" => "off".to_string(),
            _ => self.level.trim().to_string(),
        }
    }
}

/// `discovery` section: limits for one discovery run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveryConfiguration {
    /// Maximum number of files visited per tier
    pub max_files: usize,
    /// Wall-clock limit for the whole discovery run
    pub timeout_ms: u64,
}

impl Default for DiscoveryConfiguration {
    fn default() -> Self {
        Self {
            max_files: 10_000,
            timeout_ms: 5_000,
        }
    }
}

impl DiscoveryConfiguration {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
