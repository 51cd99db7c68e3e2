//! Dispatch name derivation
//!
//! The derived name is the key the dispatcher matches on, so the rule must
//! stay stable across runs: take the simple type name, strip one trailing
//! `Command` suffix, lower-case the rest.

/// Suffix removed from type names when deriving a dispatch name
pub const COMMAND_SUFFIX: &str = "Command";

/// Returns the last path segment of a type path, without generic arguments.
///
/// # Examples
///
/// ```
/// use artisan_domain::simple_type_name;
///
/// assert_eq!(simple_type_name("my_app::console::FooCommand"), "FooCommand");
/// assert_eq!(simple_type_name("Wrapper<my_app::Inner>"), "Wrapper");
/// assert_eq!(simple_type_name("FooCommand"), "FooCommand");
/// ```
pub fn simple_type_name(type_path: &str) -> &str {
    let without_generics = match type_path.find('<') {
        Some(idx) => &type_path[..idx],
        None => type_path,
    };
    match without_generics.rfind("::") {
        Some(idx) => without_generics[idx + 2..].trim(),
        None => without_generics.trim(),
    }
}

/// Derives the dispatch name for a command type.
///
/// # Examples
///
/// ```
/// use artisan_domain::derive_command_name;
///
/// assert_eq!(derive_command_name("FooCommand"), "foo");
/// assert_eq!(derive_command_name("app::commands::MakeModelCommand"), "makemodel");
/// assert_eq!(derive_command_name("Deploy"), "deploy");
/// // Already derived names come back unchanged
/// assert_eq!(derive_command_name("foo"), "foo");
/// ```
pub fn derive_command_name(type_name: &str) -> String {
    let simple = simple_type_name(type_name);
    simple
        .strip_suffix(COMMAND_SUFFIX)
        .unwrap_or(simple)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_only_trailing_suffix() {
        assert_eq!(derive_command_name("CommandRunner"), "commandrunner");
        assert_eq!(derive_command_name("CommandCommand"), "command");
        assert_eq!(derive_command_name("Testcommand"), "testcommand");
    }

    #[test]
    fn test_bare_suffix_derives_empty_name() {
        // The dispatcher rejects the empty name later on
        assert_eq!(derive_command_name("Command"), "");
    }

    #[test]
    fn test_generic_and_qualified_types() {
        assert_eq!(derive_command_name("app::SeedCommand<Postgres>"), "seed");
        assert_eq!(derive_command_name("  ListCommand "), "list");
    }

    proptest! {
        #[test]
        fn prop_derivation_is_idempotent(type_name in "[A-Za-z][A-Za-z0-9_]{0,24}") {
            let once = derive_command_name(&type_name);
            prop_assert_eq!(derive_command_name(&once), once.clone());
        }

        #[test]
        fn prop_qualification_does_not_change_name(
            module in "[a-z][a-z0-9_]{0,8}",
            type_name in "[A-Z][A-Za-z0-9]{0,16}",
        ) {
            let qualified = format!("{}::{}", module, type_name);
            prop_assert_eq!(derive_command_name(&qualified), derive_command_name(&type_name));
        }
    }
}
