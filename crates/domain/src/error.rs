//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.
//!
//! Note that the tokenizer and the dialogue entry model have no error paths:
//! malformed scripts degrade to plain text and collisions are auto-resolved.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (documents, value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A stored document declares a schema version this build does not know
    #[error("Unsupported {entity_type} schema version: {version}")]
    UnsupportedSchemaVersion {
        entity_type: &'static str,
        version: u32,
    },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.trim().is_empty() {
    ///     return Err(DomainError::validation("Character name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for malformed documents.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn unsupported_schema_version(entity_type: &'static str, version: u32) -> Self {
        Self::UnsupportedSchemaVersion {
            entity_type,
            version,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_unsupported_schema_version() {
        let err = DomainError::unsupported_schema_version("Character", 9);
        assert_eq!(err.to_string(), "Unsupported Character schema version: 9");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let domain_err: DomainError = json_err.into();
        assert!(matches!(domain_err, DomainError::Parse(_)));
    }
}
