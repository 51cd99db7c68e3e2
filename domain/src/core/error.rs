//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid command name: {0:?}")]
    InvalidCommandName(String),
}

/// Validate a dispatch name.
///
/// A valid name is non-empty and contains neither whitespace nor control
/// characters.
pub fn validate_command_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(DomainError::InvalidCommandName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_command_name_display() {
        let error = DomainError::InvalidCommandName("make model".to_string());
        assert_eq!(error.to_string(), "Invalid command name: \"make model\"");
    }

    #[test]
    fn test_validate_command_name() {
        assert!(validate_command_name("make:model").is_ok());
        assert!(validate_command_name("foo").is_ok());
        assert!(validate_command_name("").is_err());
        assert!(validate_command_name("make model").is_err());
        assert!(validate_command_name("tab\tbed").is_err());
    }
}
