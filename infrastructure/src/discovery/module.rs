//! Command module export tables (`*.cmdmod`)
//!
//! A command module is a JSON document written next to a compiled command
//! crate. It lists the types the crate exports and what they are capable of:
//!
//! ```json
//! {
//!   "module": "app-commands",
//!   "types": [
//!     {
//!       "name": "FooCommand",
//!       "kind": "struct",
//!       "abstract": false,
//!       "capabilities": ["command"],
//!       "description": "Does foo",
//!       "examples": [["foo", "--bar"]]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of command modules
pub const MODULE_EXTENSION: &str = "cmdmod";

/// Capability a type must declare to be a command
pub const COMMAND_CAPABILITY: &str = "command";

#[derive(Error, Debug)]
pub enum ModuleLoadError {
    #[error("Could not read command module: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid command module: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Kind of an exported type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Struct,
    Enum,
    Trait,
    #[serde(other)]
    Other,
}

/// One exported type
#[derive(Debug, Clone, Deserialize)]
pub struct ExportedType {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub examples: Vec<Vec<String>>,
}

impl ExportedType {
    /// Concrete struct or enum declaring the command capability
    pub fn is_command(&self) -> bool {
        !self.is_abstract
            && matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
            && self
                .capabilities
                .iter()
                .any(|c| c.eq_ignore_ascii_case(COMMAND_CAPABILITY))
    }
}

/// A loaded command module
#[derive(Debug, Clone, Deserialize)]
pub struct CommandModule {
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub types: Vec<ExportedType>,
    #[serde(skip)]
    pub path: PathBuf,
}

impl CommandModule {
    pub fn load(path: &Path) -> Result<Self, ModuleLoadError> {
        let text = fs::read_to_string(path)?;
        let mut module = Self::parse(&text)?;
        module.path = path.to_path_buf();
        Ok(module)
    }

    pub fn parse(text: &str) -> Result<Self, ModuleLoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Exported types that qualify as commands, in declaration order
    pub fn commands(&self) -> impl Iterator<Item = &ExportedType> {
        self.types.iter().filter(|t| t.is_command())
    }
}
