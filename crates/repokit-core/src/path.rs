//! Typed descriptors for query roots and their columns.
//!
//! An `EntityPath<T>` names the table behind entity `T` together with the alias
//! used to qualify its columns. A `Path<V>` names one column and fixes the Rust
//! type `V` of the values it is compared with or assigned.

use std::fmt;
use std::marker::PhantomData;

use crate::entity::{AnyEntity, Entity, default_alias};
use crate::errors::CoreError;
use crate::predicate::{CompareOp, Direction, OrderSpecifier, Predicate};
use crate::value::Value;

/// Type-erased query root: a table and the alias it is addressed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootPath {
    table: String,
    alias: String,
}

impl RootPath {
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl fmt::Display for RootPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.table, self.alias)
    }
}

/// A column qualified by the alias of its root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub alias: String,
    pub column: String,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.alias, self.column)
    }
}

/// Root descriptor for entity `T`.
pub struct EntityPath<T> {
    root: RootPath,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityPath<T> {
    /// Root for `T` using the default alias derived from `T::NAME`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_alias(default_alias(T::NAME))
    }

    /// Root for `T` with an explicit alias, for self-joins.
    #[must_use]
    pub fn with_alias(alias: impl Into<String>) -> Self {
        Self {
            root: RootPath {
                table: T::TABLE.to_string(),
                alias: alias.into(),
            },
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Default for EntityPath<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityPath<AnyEntity> {
    /// Root for a table named at runtime.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPath` if the table or alias is not a usable identifier.
    pub fn dynamic(table: &str, alias: &str) -> Result<Self, CoreError> {
        validate_identifier(table)?;
        validate_identifier(alias)?;
        Ok(Self {
            root: RootPath {
                table: table.to_string(),
                alias: alias.to_string(),
            },
            _entity: PhantomData,
        })
    }
}

impl<T> EntityPath<T> {
    #[must_use]
    pub const fn root(&self) -> &RootPath {
        &self.root
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.root.table
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.root.alias
    }

    /// Column `name` of this root, carrying values of type `V`.
    #[must_use]
    pub fn column<V>(&self, name: &str) -> Path<V> {
        Path {
            column: ColumnRef {
                alias: self.root.alias.clone(),
                column: name.to_string(),
            },
            _value: PhantomData,
        }
    }

    /// Every column of this root (`alias.*`).
    #[must_use]
    pub fn all(&self) -> Projection {
        Projection::All {
            alias: self.root.alias.clone(),
        }
    }
}

impl<T> Clone for EntityPath<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> PartialEq for EntityPath<T> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<T> fmt::Debug for EntityPath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityPath").field("root", &self.root).finish()
    }
}

impl<T> From<&EntityPath<T>> for RootPath {
    fn from(path: &EntityPath<T>) -> Self {
        path.root.clone()
    }
}

impl<T> From<EntityPath<T>> for RootPath {
    fn from(path: EntityPath<T>) -> Self {
        path.root
    }
}

/// Typed column descriptor.
pub struct Path<V> {
    column: ColumnRef,
    _value: PhantomData<fn() -> V>,
}

impl<V> Path<V> {
    #[must_use]
    pub const fn column_ref(&self) -> &ColumnRef {
        &self.column
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.column.column
    }

    #[must_use]
    pub fn is_null(&self) -> Predicate {
        Predicate::IsNull(self.column.clone())
    }

    #[must_use]
    pub fn is_not_null(&self) -> Predicate {
        Predicate::IsNotNull(self.column.clone())
    }

    /// Column-to-column equality, used to join multiple roots. The other column
    /// may differ in nullability, so its value type is not tied to `V`.
    #[must_use]
    pub fn eq_path<W>(&self, other: &Path<W>) -> Predicate {
        Predicate::ColumnCompare {
            left: self.column.clone(),
            op: CompareOp::Eq,
            right: other.column.clone(),
        }
    }

    #[must_use]
    pub fn asc(&self) -> OrderSpecifier {
        OrderSpecifier {
            column: self.column.clone(),
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub fn desc(&self) -> OrderSpecifier {
        OrderSpecifier {
            column: self.column.clone(),
            direction: Direction::Desc,
        }
    }

    fn compare(&self, op: CompareOp, value: Value) -> Predicate {
        Predicate::Compare {
            column: self.column.clone(),
            op,
            value,
        }
    }
}

impl<V: Into<Value>> Path<V> {
    /// Equality. Comparing with an absent value becomes `IS NULL`.
    pub fn eq(&self, value: impl Into<V>) -> Predicate {
        match value.into().into() {
            Value::Null => self.is_null(),
            v => self.compare(CompareOp::Eq, v),
        }
    }

    /// Inequality. Comparing with an absent value becomes `IS NOT NULL`.
    pub fn ne(&self, value: impl Into<V>) -> Predicate {
        match value.into().into() {
            Value::Null => self.is_not_null(),
            v => self.compare(CompareOp::Ne, v),
        }
    }

    pub fn lt(&self, value: impl Into<V>) -> Predicate {
        self.compare(CompareOp::Lt, value.into().into())
    }

    pub fn le(&self, value: impl Into<V>) -> Predicate {
        self.compare(CompareOp::Le, value.into().into())
    }

    pub fn gt(&self, value: impl Into<V>) -> Predicate {
        self.compare(CompareOp::Gt, value.into().into())
    }

    pub fn ge(&self, value: impl Into<V>) -> Predicate {
        self.compare(CompareOp::Ge, value.into().into())
    }

    pub fn in_list<I>(&self, values: I) -> Predicate
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        Predicate::In {
            column: self.column.clone(),
            values: values.into_iter().map(|v| v.into().into()).collect(),
        }
    }
}

impl Path<String> {
    /// SQL `LIKE` match with `%` and `_` wildcards.
    pub fn like(&self, pattern: impl Into<String>) -> Predicate {
        Predicate::Like {
            column: self.column.clone(),
            pattern: pattern.into(),
        }
    }
}

impl<V> Clone for Path<V> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            _value: PhantomData,
        }
    }
}

impl<V> fmt::Debug for Path<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path").field("column", &self.column).finish()
    }
}

/// One item of a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    All { alias: String },
    Column(ColumnRef),
}

impl<V> From<&Path<V>> for Projection {
    fn from(path: &Path<V>) -> Self {
        Self::Column(path.column.clone())
    }
}

impl<V> From<Path<V>> for Projection {
    fn from(path: Path<V>) -> Self {
        Self::Column(path.column)
    }
}

/// Reject names that cannot be quoted as identifiers.
pub(crate) fn validate_identifier(name: &str) -> Result<(), CoreError> {
    let reason = if name.is_empty() {
        "identifier is empty"
    } else if name.contains('\0') {
        "identifier contains a NUL byte"
    } else {
        return Ok(());
    };
    Err(CoreError::InvalidPath {
        path: name.to_string(),
        reason: reason.to_string(),
    })
}
