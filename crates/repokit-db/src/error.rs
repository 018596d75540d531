//! Database error types for repokit-db.

use repokit_core::CoreError;
use thiserror::Error;

/// Errors from repository support and the clauses it creates.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The support layer was used or finalized without a persistence handle.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A clause could not be rendered or its result was malformed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A single-row fetch matched more than one row.
    #[error("Expected at most one row, query matched several")]
    NonUniqueResult,

    /// A column value could not be converted to the requested Rust type.
    #[error("Cannot read column '{column}' as {expected}: found {found}")]
    Conversion {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Path construction failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
