//! Base for application repositories.
//!
//! A repository embeds a `RepositorySupport` and uses it as the starting point
//! for every query, update and delete it issues. The support holds the
//! persistence handle supplied at construction and a path-builder factory; it
//! keeps no reference to the clauses it hands out.
//!
//! Construction is two-phase: a [`RepositorySupportBuilder`] collects the
//! handle, and [`RepositorySupportBuilder::build`] checks it is present before
//! returning a usable support.

use repokit_core::{AnyEntity, Entity, EntityPath, PathBuilder, PathBuilderFactory, RootPath};

use crate::delete::DeleteClause;
use crate::error::DatabaseError;
use crate::handle::PersistenceHandle;
use crate::query::SelectQuery;
use crate::update::UpdateClause;

const HANDLE_ABSENT: &str = "persistence handle must not be absent";
const HANDLE_MISSING: &str = "persistence handle was never supplied";

/// Query entry points scoped to one persistence handle.
#[derive(Debug)]
pub struct RepositorySupport<H> {
    handle: H,
    builder_factory: PathBuilderFactory,
}

impl<H: PersistenceHandle> RepositorySupport<H> {
    /// Support over a handle the caller already holds.
    pub const fn new(handle: H) -> Self {
        Self {
            handle,
            builder_factory: PathBuilderFactory::new(),
        }
    }

    /// The handle supplied at construction.
    pub const fn handle(&self) -> &H {
        &self.handle
    }

    /// A fresh query over `paths`.
    pub fn from<I>(&self, paths: I) -> SelectQuery<'_, H>
    where
        I: IntoIterator,
        I::Item: Into<RootPath>,
    {
        SelectQuery::new(&self.handle).from(paths)
    }

    /// A fresh delete clause for `path`.
    pub fn delete<T>(&self, path: &EntityPath<T>) -> DeleteClause<'_, H> {
        DeleteClause::new(&self.handle, path.into())
    }

    /// A fresh update clause for `path`.
    pub fn update<T>(&self, path: &EntityPath<T>) -> UpdateClause<'_, H> {
        UpdateClause::new(&self.handle, path.into())
    }

    /// A path builder for `T` from this support's factory.
    pub fn path_builder<T: Entity>(&self) -> PathBuilder<T> {
        self.builder_factory.create()
    }

    /// A path builder for a table named at runtime.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if `table` is not a usable identifier.
    pub fn path_builder_for_table(&self, table: &str) -> Result<PathBuilder<AnyEntity>, DatabaseError> {
        Ok(self.builder_factory.create_for_table(table)?)
    }
}

/// Collects the persistence handle before a `RepositorySupport` is put into service.
#[derive(Debug)]
pub struct RepositorySupportBuilder<H> {
    handle: Option<H>,
}

impl<H> Default for RepositorySupportBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RepositorySupportBuilder<H> {
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Supply the handle.
    #[must_use]
    pub fn handle(mut self, handle: H) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Supply a handle that may be absent, failing fast when it is.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Configuration` if `handle` is `None`.
    pub fn set_handle(self, handle: Option<H>) -> Result<Self, DatabaseError> {
        match handle {
            Some(handle) => Ok(self.handle(handle)),
            None => Err(DatabaseError::Configuration(HANDLE_ABSENT.into())),
        }
    }

    /// Check that a handle was supplied.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Configuration` if no handle was supplied.
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.handle.is_none() {
            return Err(DatabaseError::Configuration(HANDLE_MISSING.into()));
        }
        Ok(())
    }

    /// Finalize construction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Configuration` if no handle was supplied.
    pub fn build(self) -> Result<RepositorySupport<H>, DatabaseError>
    where
        H: PersistenceHandle,
    {
        self.validate()?;
        let handle = self
            .handle
            .ok_or_else(|| DatabaseError::Configuration(HANDLE_MISSING.into()))?;
        tracing::debug!("repository support ready");
        Ok(RepositorySupport::new(handle))
    }
}
