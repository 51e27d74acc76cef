//! Domain-level error types.

use thiserror::Error;

/// Domain errors - every failure a request can end in.
///
/// The HTTP layer maps each variant to exactly one status code.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Classify a persistence failure for the entity identified by `id`.
    pub fn from_repo(err: RepoError, entity_type: &'static str, id: impl ToString) -> Self {
        match err {
            RepoError::NotFound => Self::not_found(entity_type, id),
            RepoError::Constraint(msg) => Self::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => Self::Internal(msg),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// Unique or foreign-key violation.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
