//! The ordered command table
//!
//! Insertion order is the help-listing order and the order entries are
//! registered with the dispatcher. Names are unique.

use std::collections::HashMap;

use super::entities::CommandDescriptor;

/// Insertion-ordered command descriptors keyed by dispatch name
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: Vec<CommandDescriptor>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry`, replacing any entry with the same name.
    ///
    /// A replaced entry keeps its original position. Returns the replaced
    /// descriptor, if any.
    pub fn upsert(&mut self, entry: CommandDescriptor) -> Option<CommandDescriptor> {
        match self.index.get(&entry.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot], entry)),
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    /// Insert `entry` only if its name is not taken yet.
    ///
    /// Returns `false` (and drops `entry`) when the name is already present.
    pub fn insert_if_absent(&mut self, entry: CommandDescriptor) -> bool {
        if self.index.contains_key(&entry.name) {
            return false;
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.entries.iter()
    }

    /// Dispatch names in table order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<CommandDescriptor> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a CommandTable {
    type Item = &'a CommandDescriptor;
    type IntoIter = std::slice::Iter<'a, CommandDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::entities::CommandOrigin;
    use crate::command::handle::{CommandHandle, UnresolvedReason};

    fn entry(name: &str, origin: CommandOrigin) -> CommandDescriptor {
        CommandDescriptor::new(
            name,
            CommandHandle::unresolved(name, UnresolvedReason::NotLinked),
            origin,
        )
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut table = CommandTable::new();
        table.upsert(entry("beta", CommandOrigin::Explicit));
        table.upsert(entry("alpha", CommandOrigin::Explicit));
        table.insert_if_absent(entry("gamma", CommandOrigin::DiscoveredCompiled));
        assert_eq!(table.names(), vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut table = CommandTable::new();
        table.upsert(entry("foo", CommandOrigin::Explicit).with_description("first"));
        table.upsert(entry("bar", CommandOrigin::Explicit));
        let replaced = table.upsert(entry("foo", CommandOrigin::Explicit).with_description("second"));

        assert_eq!(replaced.map(|e| e.description), Some("first".to_string()));
        assert_eq!(table.names(), vec!["foo", "bar"]);
        assert_eq!(table.get("foo").unwrap().description, "second");
    }

    #[test]
    fn test_insert_if_absent_keeps_existing() {
        let mut table = CommandTable::new();
        table.upsert(entry("foo", CommandOrigin::Explicit));
        assert!(!table.insert_if_absent(entry("foo", CommandOrigin::DiscoveredCompiled)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("foo").unwrap().origin, CommandOrigin::Explicit);
    }
}
