//! Compile-time command catalog
//!
//! Command implementations linked into the binary register themselves with
//! `inventory::submit!`, so command modules can refer to them by type name
//! without any runtime type lookup:
//!
//! ```ignore
//! use artisan_domain::{CommandInstance, CommandRegistration};
//!
//! artisan_domain::inventory::submit! {
//!     CommandRegistration::new("SeedCommand", create_seed)
//! }
//!
//! fn create_seed() -> CommandInstance {
//!     Box::new(SeedCommand::default())
//! }
//! ```
//!
//! Hosts that prefer an explicit table can build a [`CommandCatalog`] by
//! hand with [`CommandCatalog::with_factory`].

use std::collections::BTreeMap;

use super::handle::{CommandFactory, CommandInstance};
use super::naming::simple_type_name;
use super::traits::Command;

/// A self-registered command type
pub struct CommandRegistration {
    /// Type name, matched by its last path segment
    pub type_name: &'static str,
    pub create: fn() -> CommandInstance,
}

impl CommandRegistration {
    pub const fn new(type_name: &'static str, create: fn() -> CommandInstance) -> Self {
        Self { type_name, create }
    }

    pub fn factory(&self) -> CommandFactory {
        CommandFactory::from_fn(self.type_name, self.create)
    }
}

inventory::collect!(CommandRegistration);

/// Factories keyed by simple type name
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    factories: BTreeMap<String, CommandFactory>,
}

impl CommandCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every [`CommandRegistration`] linked into the binary
    pub fn linked() -> Self {
        let mut catalog = Self::new();
        for registration in inventory::iter::<CommandRegistration> {
            catalog.insert(registration.factory());
        }
        catalog
    }

    /// Add a factory (builder pattern)
    pub fn with_factory(mut self, factory: CommandFactory) -> Self {
        self.insert(factory);
        self
    }

    /// Add a `Default`-constructible command type (builder pattern)
    pub fn with<T>(self) -> Self
    where
        T: Command + Default + 'static,
    {
        self.with_factory(CommandFactory::of::<T>())
    }

    /// Add a factory; a later factory for the same simple name replaces the earlier one
    pub fn insert(&mut self, factory: CommandFactory) {
        self.factories
            .insert(factory.simple_name().to_string(), factory);
    }

    /// Look up a factory by type name (qualified or simple)
    pub fn resolve(&self, type_name: &str) -> Option<&CommandFactory> {
        self.factories.get(simple_type_name(type_name))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.resolve(type_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
