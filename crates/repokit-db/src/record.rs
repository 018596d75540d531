//! Result rows and typed column access.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use repokit_core::Value;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;

/// One result row: column names shared across the result set, plus values.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    #[must_use]
    pub const fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of the first column called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Raw value at `idx`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if `idx` is out of range.
    pub fn value(&self, idx: usize) -> Result<&Value, DatabaseError> {
        self.values.get(idx).ok_or_else(|| {
            DatabaseError::Query(format!(
                "column index {idx} out of range ({} columns)",
                self.values.len()
            ))
        })
    }

    /// Typed value at `idx`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` for a bad index and
    /// `DatabaseError::Conversion` if the value has an incompatible type.
    pub fn get<T: FromValue>(&self, idx: usize) -> Result<T, DatabaseError> {
        let value = self.value(idx)?;
        T::from_value(value).ok_or_else(|| DatabaseError::Conversion {
            column: self
                .columns
                .get(idx)
                .cloned()
                .unwrap_or_else(|| idx.to_string()),
            expected: T::EXPECTED,
            found: value.type_name(),
        })
    }

    /// Typed value of the column called `name`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` if no such column exists, otherwise as [`Self::get`].
    pub fn get_by_name<T: FromValue>(&self, name: &str) -> Result<T, DatabaseError> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| DatabaseError::Query(format!("no column named '{name}'")))?;
        self.get(idx)
    }
}

/// Conversion from a column value.
pub trait FromValue: Sized {
    /// Type name reported when the conversion fails.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const EXPECTED: &'static str = "32-bit integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Self::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromValue for u32 {
    const EXPECTED: &'static str = "unsigned 32-bit integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Self::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromValue for u64 {
    const EXPECTED: &'static str = "unsigned integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Self::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean (0 or 1)";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(0) => Some(false),
            Value::Integer(1) => Some(true),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "real";

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Real(r) => Some(*r),
            Value::Integer(i) => Some(*i as Self),
            _ => None,
        }
    }
}

impl FromValue for Vec<u8> {
    const EXPECTED: &'static str = "blob";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Blob(b) => Some(b.clone()),
            _ => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    const EXPECTED: &'static str = "datetime text";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => parse_datetime(s).ok(),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Mapping from a whole row to an application type.
pub trait FromRecord: Sized {
    /// # Errors
    ///
    /// Returns `DatabaseError` if a column is missing or has the wrong type.
    fn from_record(record: &Record) -> Result<Self, DatabaseError>;
}

impl FromRecord for Record {
    fn from_record(record: &Record) -> Result<Self, DatabaseError> {
        Ok(record.clone())
    }
}
