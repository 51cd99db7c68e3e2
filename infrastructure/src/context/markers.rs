//! Fixed file names and text markers used to classify a Cargo project

use regex::Regex;
use std::sync::LazyLock;

/// Web frameworks that make a package a web host
pub const WEB_FRAMEWORKS: &[&str] = &["axum", "actix-web", "rocket", "warp", "poem", "tide"];

/// Background-job frameworks that make a package a worker service
pub const WORKER_FRAMEWORKS: &[&str] = &["apalis", "tokio-cron-scheduler", "faktory", "background-jobs"];

/// Root-level files that count as project configuration
pub const CONFIGURATION_FILES: &[&str] = &[
    "config.toml",
    "settings.toml",
    "Settings.toml",
    ".env",
];

/// Source text that indicates a database connection type
pub const DATA_CONTEXT_MARKERS: &[&str] = &[
    "DatabaseConnection",
    "PgPool",
    "SqlitePool",
    "MySqlPool",
    "sqlx::Pool",
    "diesel::",
];

/// Manifest dependency tables read for package identifiers
pub const DEPENDENCY_TABLES: &[&str] = &["dependencies", "dev-dependencies", "build-dependencies"];

/// File name fragment that marks a test manifest
pub const TEST_MARKER: &str = "test";

static PACKAGE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\[package\]").expect("Invalid package header regex"));

static WORKSPACE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\[workspace\]").expect("Invalid workspace header regex"));

static BIN_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\[\[bin\]\]").expect("Invalid bin table regex"));

static TABLE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*([^\[\]]+?)\s*\]\s*(?:#.*)?$").expect("Invalid table header regex"));

static DEPENDENCY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"?([A-Za-z0-9_-]+)"?\s*[=.]"#).expect("Invalid dependency key regex"));

static LOCK_PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^name\s*=\s*"([^"]+)""#).expect("Invalid lock package regex"));

pub fn has_package_header(manifest: &str) -> bool {
    PACKAGE_HEADER.is_match(manifest)
}

pub fn has_manifest_header(manifest: &str) -> bool {
    has_package_header(manifest) || WORKSPACE_HEADER.is_match(manifest)
}

pub fn has_bin_table(manifest: &str) -> bool {
    BIN_TABLE.is_match(manifest)
}

/// Whether `manifest` declares a runtime dependency on any of `crates`.
///
/// Only `[dependencies]` tables count, including `[target.*.dependencies]`
/// and `[workspace.dependencies]`, either as `name = ...` lines or as
/// `[dependencies.name]` tables. Dev and build dependencies are ignored.
pub fn declares_dependency(manifest: &str, crates: &[&str]) -> bool {
    let mut in_dependencies = false;
    for line in manifest.lines() {
        let line = line.trim_start();
        if line.starts_with('[') {
            let Some(header) = TABLE_HEADER.captures(line).and_then(|c| c.get(1)) else {
                in_dependencies = false;
                continue;
            };
            let header = header.as_str();
            in_dependencies = is_dependency_table(header);
            let names_crate = crates.iter().any(|name| {
                header
                    .strip_suffix(*name)
                    .and_then(|rest| rest.strip_suffix('.'))
                    .is_some_and(is_dependency_table)
            });
            if names_crate {
                return true;
            }
        } else if in_dependencies {
            let key = DEPENDENCY_KEY.captures(line).and_then(|c| c.get(1));
            if key.is_some_and(|key| crates.contains(&key.as_str())) {
                return true;
            }
        }
    }
    false
}

fn is_dependency_table(header: &str) -> bool {
    header == "dependencies" || header.ends_with(".dependencies")
}

/// Package names listed in a `Cargo.lock`
pub fn lock_file_packages(lock: &str) -> impl Iterator<Item = &str> {
    LOCK_PACKAGE_NAME
        .captures_iter(lock)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str())
}
