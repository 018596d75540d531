//! Boolean conditions and ordering over column paths.

use crate::path::ColumnRef;
use crate::value::Value;

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// SQL spelling of the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// A condition tree built from column paths.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: ColumnRef,
        op: CompareOp,
        value: Value,
    },
    ColumnCompare {
        left: ColumnRef,
        op: CompareOp,
        right: ColumnRef,
    },
    IsNull(ColumnRef),
    IsNotNull(ColumnRef),
    /// Membership test. An empty list matches nothing.
    In {
        column: ColumnRef,
        values: Vec<Value>,
    },
    Like {
        column: ColumnRef,
        pattern: String,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Conjunction. Nested `And`s are flattened.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), right) => {
                left.push(right);
                Self::And(left)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// Disjunction. Nested `Or`s are flattened.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), right) => {
                left.push(right);
                Self::Or(left)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }

    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// Combine every predicate with AND. Returns `None` for an empty input.
    pub fn all(predicates: impl IntoIterator<Item = Self>) -> Option<Self> {
        predicates.into_iter().reduce(Self::and)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpecifier {
    pub column: ColumnRef,
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> ColumnRef {
        ColumnRef {
            alias: "task".into(),
            column: name.into(),
        }
    }

    #[test]
    fn and_flattens_nested_conjunctions() {
        let p = Predicate::IsNull(col("a"))
            .and(Predicate::IsNull(col("b")))
            .and(Predicate::IsNull(col("c")));
        let Predicate::And(parts) = p else {
            panic!("expected And");
        };
        assert_eq!(parts.len(), 3);
    }

    #[test]
    fn or_flattens_nested_disjunctions() {
        let left = Predicate::IsNull(col("a")).or(Predicate::IsNull(col("b")));
        let right = Predicate::IsNull(col("c")).or(Predicate::IsNull(col("d")));
        let Predicate::Or(parts) = left.or(right) else {
            panic!("expected Or");
        };
        assert_eq!(parts.len(), 4);
    }

    #[test]
    fn double_negation_cancels() {
        let p = Predicate::IsNull(col("a"));
        assert_eq!(p.clone().negate().negate(), p);
    }

    #[test]
    fn all_of_nothing_is_none() {
        assert_eq!(Predicate::all(Vec::new()), None);
        let single = Predicate::all(vec![Predicate::IsNull(col("a"))]);
        assert_eq!(single, Some(Predicate::IsNull(col("a"))));
    }
}
