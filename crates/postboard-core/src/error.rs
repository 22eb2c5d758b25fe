//! Domain-level error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PostId;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{message}")]
    InvalidParameter {
        field: &'static str,
        message: String,
    },

    #[error("Invalid post data")]
    Validation(Vec<FieldError>),

    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: PostId },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: PostId) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Store-level errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Post with id {0} not found")]
    NotFound(PostId),

    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => DomainError::post_not_found(id),
            StoreError::Io(msg) | StoreError::Serialization(msg) => DomainError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DomainError::post_not_found(7);
        assert_eq!(err.to_string(), "Post with id 7 not found");
    }

    #[test]
    fn test_store_error_maps_to_domain() {
        assert!(matches!(
            DomainError::from(StoreError::NotFound(3)),
            DomainError::NotFound { id: 3, .. }
        ));
        assert!(matches!(
            DomainError::from(StoreError::Io("disk full".into())),
            DomainError::Internal(_)
        ));
    }
}
