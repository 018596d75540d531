//! UPDATE clauses.
//!
//! Only columns passed to `set`/`set_null` appear in the SET list, so a clause
//! touches exactly the fields the caller changed.

use repokit_core::{Path, Predicate, RootPath, Value};

use crate::error::DatabaseError;
use crate::handle::{PersistenceHandle, Statement};
use crate::render::{SqlWriter, quote_ident};

/// An UPDATE bound to a persistence handle and one root.
#[derive(Debug)]
pub struct UpdateClause<'h, H> {
    handle: &'h H,
    root: RootPath,
    assignments: Vec<(String, Value)>,
    filters: Vec<Predicate>,
}

impl<'h, H> UpdateClause<'h, H> {
    pub(crate) const fn new(handle: &'h H, root: RootPath) -> Self {
        Self {
            handle,
            root,
            assignments: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Assign `value` to `path`. Assigning the same column twice keeps the last value.
    #[must_use]
    pub fn set<V: Into<Value>>(self, path: &Path<V>, value: impl Into<V>) -> Self {
        self.assign(path.name(), value.into().into())
    }

    #[must_use]
    pub fn set_null<V>(self, path: &Path<V>) -> Self {
        self.assign(path.name(), Value::Null)
    }

    /// Add a condition. Multiple conditions are AND-ed.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    #[must_use]
    pub const fn handle(&self) -> &'h H {
        self.handle
    }

    #[must_use]
    pub const fn root(&self) -> &RootPath {
        &self.root
    }

    fn assign(mut self, column: &str, value: Value) -> Self {
        if let Some(slot) = self.assignments.iter_mut().find(|(c, _)| c == column) {
            slot.1 = value;
        } else {
            self.assignments.push((column.to_string(), value));
        }
        self
    }

    /// Render the UPDATE statement.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if nothing was assigned.
    pub fn to_statement(&self) -> Result<Statement, DatabaseError> {
        if self.assignments.is_empty() {
            return Err(DatabaseError::Query(format!(
                "update of '{}' has no assignments",
                self.root.table()
            )));
        }
        let mut w = SqlWriter::unqualified();
        w.push("UPDATE ");
        w.root(&self.root);
        w.push(" SET ");
        for (i, (column, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push(&quote_ident(column));
            w.push(" = ");
            w.bind(value.clone());
        }
        w.where_clause(&self.filters);
        Ok(w.finish())
    }
}

impl<H: PersistenceHandle> UpdateClause<'_, H> {
    /// Run the update and return the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns rendering errors, or the handle's error unchanged.
    pub async fn execute(&self) -> Result<u64, DatabaseError> {
        let statement = self.to_statement()?;
        tracing::debug!(sql = %statement.sql, params = statement.params.len(), "update");
        self.handle.execute(&statement).await
    }
}
