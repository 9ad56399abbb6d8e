//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// Record not found - includes the record type and key.
    #[error("{entity_type} not found: {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    /// Store operation failed - includes operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    /// Store constraint violated (e.g. a counter moving backwards).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            key: key.to_string(),
        }
    }

    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
