//! Catalog error taxonomy.

use common::{EntityKind, NameIdentifier};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed classification of failure causes, carried by failure events.
///
/// `ObserverFailure` never appears on a failure event and is never
/// surfaced to callers; it exists for the dispatch bus's side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyExists,
    ConcurrentModification,
    AccessDenied,
    ObserverFailure,
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorKind::AccessDenied => "ACCESS_DENIED",
            ErrorKind::ObserverFailure => "OBSERVER_FAILURE",
            ErrorKind::Internal => "INTERNAL",
        };
        f.write_str(name)
    }
}

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request itself is malformed; rejected before any event is
    /// dispatched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The target identifier does not resolve.
    #[error("{kind} not found: {identifier}")]
    NotFound {
        kind: EntityKind,
        identifier: NameIdentifier,
    },

    /// Creation or rename collided with an existing entity.
    #[error("{kind} already exists: {identifier}")]
    AlreadyExists {
        kind: EntityKind,
        identifier: NameIdentifier,
    },

    /// An optimistic check failed between read and apply.
    #[error("concurrent modification of {identifier}")]
    ConcurrentModification { identifier: NameIdentifier },

    /// The acting principal is not allowed to perform the operation.
    #[error("access denied for {actor} on {identifier}")]
    AccessDenied {
        actor: String,
        identifier: NameIdentifier,
    },

    /// Unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Classifies this error into the closed [`ErrorKind`] space.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            CatalogError::ConcurrentModification { .. } => ErrorKind::ConcurrentModification,
            CatalogError::AccessDenied { .. } => ErrorKind::AccessDenied,
            CatalogError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_classification() {
        let err = CatalogError::NotFound {
            kind: EntityKind::Model,
            identifier: NameIdentifier::of_model("lake", "cat", "sch", "m1"),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "model not found: lake.cat.sch.m1");

        let err = CatalogError::Validation("empty name".to_string());
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::ConcurrentModification.to_string(), "CONCURRENT_MODIFICATION");
        assert_eq!(ErrorKind::ObserverFailure.to_string(), "OBSERVER_FAILURE");
    }
}
