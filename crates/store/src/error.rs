//! Storage-layer error model.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a repository operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connectivity or statement failure reported by the database driver,
    /// including foreign-key constraint violations on delete.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A referential-integrity rule refused the operation.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The store itself is broken (e.g. a poisoned lock).
    #[error("store internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
