//! Value objects for project context

use std::fmt;

/// Manifest properties the detector extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// `package.name`
    Name,
    /// `package.version`
    Version,
    /// `package.edition`
    Edition,
    /// `package.rust-version`
    RustVersion,
    /// `lib.name`
    LibName,
}

impl PropertyKey {
    /// All keys, in extraction order
    pub fn all() -> &'static [PropertyKey] {
        &[
            PropertyKey::Name,
            PropertyKey::Version,
            PropertyKey::Edition,
            PropertyKey::RustVersion,
            PropertyKey::LibName,
        ]
    }

    /// Key used in [`ProjectContext::properties`](super::ProjectContext::properties)
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKey::Name => "name",
            PropertyKey::Version => "version",
            PropertyKey::Edition => "edition",
            PropertyKey::RustVersion => "rust-version",
            PropertyKey::LibName => "lib-name",
        }
    }

    /// Manifest table and field the value is read from
    pub fn manifest_location(&self) -> (&'static str, &'static str) {
        match self {
            PropertyKey::Name => ("package", "name"),
            PropertyKey::Version => ("package", "version"),
            PropertyKey::Edition => ("package", "edition"),
            PropertyKey::RustVersion => ("package", "rust-version"),
            PropertyKey::LibName => ("lib", "name"),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
