//! Command hints from Rust source text
//!
//! A file declares a command when it contains both a `struct ` declaration
//! and an `impl Command for <Type>` block whose `<Type>` is one of the
//! structs declared in that same file. Path-qualified trait names
//! (`impl artisan::Command for ...`) and generic impls are recognised.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

const DECLARATION_KEYWORD: &str = "struct ";

static STRUCT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?struct\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("Invalid struct declaration regex")
});

static COMMAND_IMPL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"impl(?:\s*<[^>]*>)?\s+(?:[A-Za-z_][A-Za-z0-9_]*::)*Command\s+for\s+([A-Za-z_][A-Za-z0-9_]*)",
    )
    .expect("Invalid command impl regex")
});

/// Type names in `text` that implement `Command` and are declared here.
///
/// Returned in order of their `impl` blocks, without duplicates.
pub fn command_types(text: &str) -> Vec<String> {
    if !text.contains(DECLARATION_KEYWORD) || !COMMAND_IMPL.is_match(text) {
        return Vec::new();
    }

    let declared: BTreeSet<&str> = STRUCT_DECLARATION
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();

    let mut found: Vec<String> = Vec::new();
    for captures in COMMAND_IMPL.captures_iter(text) {
        let Some(name) = captures.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if declared.contains(name) && !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    found
}
