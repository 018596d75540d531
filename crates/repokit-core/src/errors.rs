//! Error types for the query model.
//!
//! Execution errors (`DatabaseError`) are defined in `repokit-db`, which wraps
//! `CoreError` when path construction fails at runtime.

use thiserror::Error;

/// Errors raised while building paths and predicates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A table, alias or column name cannot be used as an identifier.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
