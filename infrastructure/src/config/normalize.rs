//! Case-insensitive field names
//!
//! Configuration files are hand-edited, so `CommandsPath`, `commands_path`
//! and `commandsPath` all name the same field. Before the value reaches serde
//! every known field name is rewritten to its canonical camelCase spelling.
//! Keys inside data maps (`aliases`, `paths`) are user data and kept as-is.

use serde_json::{Map, Value};

/// How the fields of one object level are spelled
struct Level {
    fields: &'static [&'static str],
    /// Fields holding a nested settings object
    nested: &'static [(&'static str, &'static Level)],
}

const ROOT: Level = Level {
    fields: &[
        "commandsPath",
        "enableCommandDiscovery",
        "aliases",
        "paths",
        "providers",
        "logging",
        "discovery",
    ],
    nested: &[("logging", &LOGGING), ("discovery", &DISCOVERY)],
};

const LOGGING: Level = Level {
    fields: &["level", "enableColors", "enableTimestamps"],
    nested: &[],
};

const DISCOVERY: Level = Level {
    fields: &["maxFiles", "timeoutMs"],
    nested: &[],
};

/// Rewrite known field names of a parsed configuration to camelCase.
///
/// Null values are dropped so that they fall back to defaults.
pub(crate) fn normalize_keys(value: Value) -> Value {
    normalize_level(value, &ROOT)
}

fn normalize_level(value: Value, level: &Level) -> Value {
    let Value::Object(object) = value else {
        return value;
    };

    let mut normalized = Map::with_capacity(object.len());
    for (key, value) in object {
        if value.is_null() {
            continue;
        }
        let key = canonical_field(&key, level).map_or(key, str::to_string);
        let value = match level.nested.iter().find(|(field, _)| *field == key) {
            Some((_, nested)) => normalize_level(value, nested),
            None => value,
        };
        normalized.insert(key, value);
    }
    Value::Object(normalized)
}

fn canonical_field(key: &str, level: &Level) -> Option<&'static str> {
    let folded = fold(key);
    level.fields.iter().copied().find(|field| fold(field) == folded)
}

/// Lower-case with `_` and `-` removed
fn fold(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
