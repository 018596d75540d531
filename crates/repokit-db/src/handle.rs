//! The persistence handle seam.
//!
//! Clauses render themselves into a [`Statement`] and hand it to a
//! `PersistenceHandle`. Anything that can run positional-parameter SQL can sit
//! behind the support layer: the libSQL session, a recording double in tests,
//! or a shared reference to either.

use std::sync::Arc;

use repokit_core::Value;

use crate::error::DatabaseError;
use crate::record::Record;

/// Rendered SQL plus its positional parameters (`?1`, `?2`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// A session able to run statements.
///
/// Errors are returned as-is to the caller of the clause; the support layer
/// never retries or rewraps them.
#[allow(async_fn_in_trait)]
pub trait PersistenceHandle {
    /// Run a statement that returns no rows. Returns the affected-row count.
    async fn execute(&self, statement: &Statement) -> Result<u64, DatabaseError>;

    /// Run a statement and collect every row.
    async fn query(&self, statement: &Statement) -> Result<Vec<Record>, DatabaseError>;
}

impl<H: PersistenceHandle> PersistenceHandle for &H {
    async fn execute(&self, statement: &Statement) -> Result<u64, DatabaseError> {
        (**self).execute(statement).await
    }

    async fn query(&self, statement: &Statement) -> Result<Vec<Record>, DatabaseError> {
        (**self).query(statement).await
    }
}

impl<H: PersistenceHandle> PersistenceHandle for Arc<H> {
    async fn execute(&self, statement: &Statement) -> Result<u64, DatabaseError> {
        self.as_ref().execute(statement).await
    }

    async fn query(&self, statement: &Statement) -> Result<Vec<Record>, DatabaseError> {
        self.as_ref().query(statement).await
    }
}
