//! Workflow error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::validation::ValidationErrors;

/// Terminal outcome of a rejected request.
///
/// Every kind maps to exactly one HTTP status in [`crate::error::AppError`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input (bad price, missing field, malformed email, unknown
    /// state code).
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Create request whose natural key already exists.
    #[error("{0}")]
    Conflict(String),

    /// Lookup or update target does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Store failure.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
