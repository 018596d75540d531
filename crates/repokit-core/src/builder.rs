//! Dynamic path construction.
//!
//! `PathBuilder<T>` hands out column paths by name for entities that have no
//! hand-written path struct. `PathBuilderFactory` creates builders; it holds no
//! state, so one factory per repository is enough.

use std::fmt;

use crate::entity::{AnyEntity, Entity, default_alias};
use crate::errors::CoreError;
use crate::path::{EntityPath, Path, validate_identifier};

/// Produces column paths for entity `T` on demand.
pub struct PathBuilder<T> {
    root: EntityPath<T>,
}

impl<T: Entity> PathBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: EntityPath::new(),
        }
    }

    #[must_use]
    pub fn with_alias(alias: impl Into<String>) -> Self {
        Self {
            root: EntityPath::with_alias(alias),
        }
    }
}

impl<T: Entity> Default for PathBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathBuilder<T> {
    /// The root path this builder qualifies columns with.
    #[must_use]
    pub const fn root(&self) -> &EntityPath<T> {
        &self.root
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        self.root.alias()
    }

    /// Column `name` typed as `V`.
    #[must_use]
    pub fn get<V>(&self, name: &str) -> Path<V> {
        self.root.column(name)
    }

    /// Column `name` validated as an identifier.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPath` for empty names or names with NUL bytes.
    pub fn try_get<V>(&self, name: &str) -> Result<Path<V>, CoreError> {
        validate_identifier(name)?;
        Ok(self.root.column(name))
    }

    #[must_use]
    pub fn string(&self, name: &str) -> Path<String> {
        self.get(name)
    }

    #[must_use]
    pub fn number(&self, name: &str) -> Path<i64> {
        self.get(name)
    }
}

impl<T> Clone for PathBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T> PartialEq for PathBuilder<T> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<T> fmt::Debug for PathBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathBuilder").field("root", &self.root).finish()
    }
}

/// Stateless factory for `PathBuilder`s.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PathBuilderFactory;

impl PathBuilderFactory {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builder for `T`, aliased by its lower-camel-case name.
    #[must_use]
    pub fn create<T: Entity>(&self) -> PathBuilder<T> {
        PathBuilder::with_alias(default_alias(T::NAME))
    }

    /// Builder for a table named at runtime.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPath` if `table` is not a usable identifier.
    pub fn create_for_table(&self, table: &str) -> Result<PathBuilder<AnyEntity>, CoreError> {
        Ok(PathBuilder {
            root: EntityPath::dynamic(table, &default_alias(AnyEntity::NAME))?,
        })
    }
}
