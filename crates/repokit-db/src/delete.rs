//! DELETE clauses.

use repokit_core::{Predicate, RootPath};

use crate::error::DatabaseError;
use crate::handle::{PersistenceHandle, Statement};
use crate::render::SqlWriter;

/// A DELETE bound to a persistence handle and one root.
///
/// Without a filter every row of the table is removed.
#[derive(Debug)]
pub struct DeleteClause<'h, H> {
    handle: &'h H,
    root: RootPath,
    filters: Vec<Predicate>,
}

impl<'h, H> DeleteClause<'h, H> {
    pub(crate) const fn new(handle: &'h H, root: RootPath) -> Self {
        Self {
            handle,
            root,
            filters: Vec::new(),
        }
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

    #[must_use]
    pub fn to_statement(&self) -> Statement {
        let mut w = SqlWriter::unqualified();
        w.push("DELETE FROM ");
        w.root(&self.root);
        w.where_clause(&self.filters);
        w.finish()
    }
}

impl<H: PersistenceHandle> DeleteClause<'_, H> {
    /// Run the delete and return the number of removed rows.
    ///
    /// # Errors
    ///
    /// Returns the handle's error unchanged.
    pub async fn execute(&self) -> Result<u64, DatabaseError> {
        let statement = self.to_statement();
        if self.filters.is_empty() {
            tracing::warn!(table = self.root.table(), "delete without filter removes every row");
        }
        tracing::debug!(sql = %statement.sql, params = statement.params.len(), "delete");
        self.handle.execute(&statement).await
    }
}
