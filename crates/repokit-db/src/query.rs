//! SELECT queries over one or more roots.

use repokit_core::{OrderSpecifier, Predicate, Projection, RootPath};

use crate::error::DatabaseError;
use crate::handle::{PersistenceHandle, Statement};
use crate::record::{FromRecord, Record};
use crate::render::SqlWriter;

/// A query bound to a persistence handle.
///
/// Built fresh by `RepositorySupport::from`; every builder method consumes and
/// returns the query so conditions can be chained.
#[derive(Debug)]
pub struct SelectQuery<'h, H> {
    handle: &'h H,
    roots: Vec<RootPath>,
    projection: Vec<Projection>,
    filters: Vec<Predicate>,
    order: Vec<OrderSpecifier>,
    limit: Option<u64>,
    offset: Option<u64>,
    distinct: bool,
}

impl<H> Clone for SelectQuery<'_, H> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            roots: self.roots.clone(),
            projection: self.projection.clone(),
            filters: self.filters.clone(),
            order: self.order.clone(),
            limit: self.limit,
            offset: self.offset,
            distinct: self.distinct,
        }
    }
}

impl<'h, H> SelectQuery<'h, H> {
    pub(crate) const fn new(handle: &'h H) -> Self {
        Self {
            handle,
            roots: Vec::new(),
            projection: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            distinct: false,
        }
    }

    /// Add query roots.
    #[must_use]
    pub fn from<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RootPath>,
    {
        self.roots.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Replace the SELECT list. Without a projection every column of the first
    /// root is returned.
    #[must_use]
    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Projection>,
    {
        self.projection = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add a condition. Multiple conditions are AND-ed.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: OrderSpecifier) -> Self {
        self.order.push(order);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// The handle this query runs against.
    #[must_use]
    pub const fn handle(&self) -> &'h H {
        self.handle
    }

    #[must_use]
    pub fn roots(&self) -> &[RootPath] {
        &self.roots
    }

    /// Render the SELECT statement.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if no root was given.
    pub fn to_statement(&self) -> Result<Statement, DatabaseError> {
        let mut w = SqlWriter::qualified();
        self.write_select(&mut w)?;
        w.order(&self.order);
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => w.push(&format!(" LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => w.push(&format!(" LIMIT {limit}")),
            // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
            (None, Some(offset)) => w.push(&format!(" LIMIT -1 OFFSET {offset}")),
            (None, None) => {}
        }
        Ok(w.finish())
    }

    /// Render the row-count statement. Ordering and paging are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if no root was given.
    pub fn to_count_statement(&self) -> Result<Statement, DatabaseError> {
        let mut w = SqlWriter::qualified();
        if self.distinct {
            w.push("SELECT COUNT(*) FROM (");
            self.write_select(&mut w)?;
            w.push(")");
        } else {
            let first = self.first_root()?;
            w.push("SELECT COUNT(*) FROM ");
            w.root(first);
            self.write_joins_and_filters(&mut w);
        }
        Ok(w.finish())
    }

    fn first_root(&self) -> Result<&RootPath, DatabaseError> {
        self.roots
            .first()
            .ok_or_else(|| DatabaseError::Query("query has no root path".into()))
    }

    fn write_select(&self, w: &mut SqlWriter) -> Result<(), DatabaseError> {
        let first = self.first_root()?;
        w.push(if self.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });
        if self.projection.is_empty() {
            w.projection(&Projection::All {
                alias: first.alias().to_string(),
            });
        } else {
            for (i, projection) in self.projection.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                w.projection(projection);
            }
        }
        w.push(" FROM ");
        w.root(first);
        self.write_joins_and_filters(w);
        Ok(())
    }

    fn write_joins_and_filters(&self, w: &mut SqlWriter) {
        for root in self.roots.iter().skip(1) {
            w.push(", ");
            w.root(root);
        }
        w.where_clause(&self.filters);
    }
}

impl<H: PersistenceHandle> SelectQuery<'_, H> {
    /// Run the query and return every row.
    ///
    /// # Errors
    ///
    /// Returns rendering errors, or the handle's error unchanged.
    pub async fn fetch(&self) -> Result<Vec<Record>, DatabaseError> {
        let statement = self.to_statement()?;
        tracing::debug!(sql = %statement.sql, params = statement.params.len(), "select");
        self.handle.query(&statement).await
    }

    /// Run the query and map every row with `FromRecord`.
    ///
    /// # Errors
    ///
    /// As [`Self::fetch`], plus mapping errors.
    pub async fn fetch_as<T: FromRecord>(&self) -> Result<Vec<T>, DatabaseError> {
        self.fetch().await?.iter().map(T::from_record).collect()
    }

    /// First row, if any. Adds `LIMIT 1` unless the query is already limited
    /// to nothing.
    ///
    /// # Errors
    ///
    /// As [`Self::fetch`].
    pub async fn fetch_first(&self) -> Result<Option<Record>, DatabaseError> {
        let first = match self.limit {
            Some(0) => self.clone(),
            _ => self.clone().limit(1),
        };
        let rows = first.fetch().await?;
        Ok(rows.into_iter().next())
    }

    /// The only matching row, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NonUniqueResult` if more than one row matches,
    /// otherwise as [`Self::fetch`].
    pub async fn fetch_one(&self) -> Result<Option<Record>, DatabaseError> {
        let probe = match self.limit {
            Some(limit) if limit < 2 => self.clone(),
            _ => self.clone().limit(2),
        };
        let mut rows = probe.fetch().await?;
        if rows.len() > 1 {
            return Err(DatabaseError::NonUniqueResult);
        }
        Ok(rows.pop())
    }

    /// Number of matching rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the count query returned no row,
    /// otherwise as [`Self::fetch`].
    pub async fn count(&self) -> Result<u64, DatabaseError> {
        let statement = self.to_count_statement()?;
        tracing::debug!(sql = %statement.sql, params = statement.params.len(), "count");
        let rows = self.handle.query(&statement).await?;
        let row = rows.first().ok_or(DatabaseError::NoResult)?;
        row.get::<u64>(0)
    }

    /// Whether at least one row matches.
    ///
    /// # Errors
    ///
    /// As [`Self::fetch`].
    pub async fn exists(&self) -> Result<bool, DatabaseError> {
        Ok(self.fetch_first().await?.is_some())
    }
}
