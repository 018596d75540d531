//! SQL rendering for the `SQLite` dialect.
//!
//! Identifiers are always double-quoted and every value is bound as a
//! positional parameter. SELECT statements qualify columns with their root
//! alias; UPDATE and DELETE address one table and write bare column names.

use repokit_core::{ColumnRef, OrderSpecifier, Predicate, Projection, RootPath, Value};

use crate::handle::Statement;

/// Quote an identifier, doubling embedded quotes.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Accumulates SQL text and its bound parameters.
pub(crate) struct SqlWriter {
    sql: String,
    params: Vec<Value>,
    qualify: bool,
}

impl SqlWriter {
    /// Writer for SELECT statements (qualified columns).
    pub(crate) const fn qualified() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            qualify: true,
        }
    }

    /// Writer for single-table UPDATE/DELETE statements.
    pub(crate) const fn unqualified() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            qualify: false,
        }
    }

    pub(crate) fn push(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub(crate) fn bind(&mut self, value: Value) {
        self.params.push(value);
        self.sql.push('?');
        self.sql.push_str(&self.params.len().to_string());
    }

    pub(crate) fn column(&mut self, column: &ColumnRef) {
        if self.qualify {
            self.sql.push_str(&quote_ident(&column.alias));
            self.sql.push('.');
        }
        self.sql.push_str(&quote_ident(&column.column));
    }

    pub(crate) fn root(&mut self, root: &RootPath) {
        self.sql.push_str(&quote_ident(root.table()));
        if self.qualify {
            self.sql.push_str(" AS ");
            self.sql.push_str(&quote_ident(root.alias()));
        }
    }

    pub(crate) fn projection(&mut self, projection: &Projection) {
        match projection {
            Projection::All { alias } => {
                self.sql.push_str(&quote_ident(alias));
                self.sql.push_str(".*");
            }
            Projection::Column(column) => self.column(column),
        }
    }

    pub(crate) fn order(&mut self, order: &[OrderSpecifier]) {
        if order.is_empty() {
            return;
        }
        self.push(" ORDER BY ");
        for (i, spec) in order.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.column(&spec.column);
            self.push(" ");
            self.push(spec.direction.as_sql());
        }
    }

    /// Append ` WHERE ...` for the conjunction of `filters`, if any.
    pub(crate) fn where_clause(&mut self, filters: &[Predicate]) {
        if let Some(predicate) = Predicate::all(filters.iter().cloned()) {
            self.push(" WHERE ");
            self.predicate(&predicate);
        }
    }

    pub(crate) fn predicate(&mut self, predicate: &Predicate) {
        match predicate {
            Predicate::Compare { column, op, value } => {
                self.column(column);
                self.push(" ");
                self.push(op.as_sql());
                self.push(" ");
                self.bind(value.clone());
            }
            Predicate::ColumnCompare { left, op, right } => {
                self.column(left);
                self.push(" ");
                self.push(op.as_sql());
                self.push(" ");
                self.column(right);
            }
            Predicate::IsNull(column) => {
                self.column(column);
                self.push(" IS NULL");
            }
            Predicate::IsNotNull(column) => {
                self.column(column);
                self.push(" IS NOT NULL");
            }
            Predicate::In { values, .. } if values.is_empty() => self.push("1 = 0"),
            Predicate::In { column, values } => {
                self.column(column);
                self.push(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.bind(value.clone());
                }
                self.push(")");
            }
            Predicate::Like { column, pattern } => {
                self.column(column);
                self.push(" LIKE ");
                self.bind(Value::Text(pattern.clone()));
            }
            Predicate::And(parts) => self.junction(parts, " AND ", "1 = 1"),
            Predicate::Or(parts) => self.junction(parts, " OR ", "1 = 0"),
            Predicate::Not(inner) => {
                self.push("NOT (");
                self.predicate(inner);
                self.push(")");
            }
        }
    }

    fn junction(&mut self, parts: &[Predicate], separator: &str, empty: &str) {
        if parts.is_empty() {
            self.push(empty);
            return;
        }
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            let nested = matches!(part, Predicate::And(_) | Predicate::Or(_));
            if nested {
                self.push("(");
            }
            self.predicate(part);
            if nested {
                self.push(")");
            }
        }
    }

    pub(crate) fn finish(self) -> Statement {
        Statement::new(self.sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use repokit_core::CompareOp;

    fn col(name: &str) -> ColumnRef {
        ColumnRef {
            alias: "task".into(),
            column: name.into(),
        }
    }

    fn render(predicate: &Predicate, qualify: bool) -> Statement {
        let mut w = if qualify {
            SqlWriter::qualified()
        } else {
            SqlWriter::unqualified()
        };
        w.predicate(predicate);
        w.finish()
    }

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn nested_or_inside_and_is_parenthesized() {
        let p = Predicate::IsNull(col("a")).and(
            Predicate::Compare {
                column: col("b"),
                op: CompareOp::Eq,
                value: Value::Integer(1),
            }
            .or(Predicate::IsNotNull(col("c"))),
        );
        let st = render(&p, true);
        assert_eq!(
            st.sql,
            r#""task"."a" IS NULL AND ("task"."b" = ?1 OR "task"."c" IS NOT NULL)"#
        );
        assert_eq!(st.params, vec![Value::Integer(1)]);
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let p = Predicate::In {
            column: col("id"),
            values: Vec::new(),
        };
        assert_eq!(render(&p, true).sql, "1 = 0");
    }

    #[test]
    fn in_list_binds_each_value() {
        let p = Predicate::In {
            column: col("id"),
            values: vec![Value::Integer(1), Value::Integer(2)],
        };
        let st = render(&p, false);
        assert_eq!(st.sql, r#""id" IN (?1, ?2)"#);
        assert_eq!(st.params.len(), 2);
    }

    #[test]
    fn negation_wraps_inner() {
        let p = Predicate::Like {
            column: col("title"),
            pattern: "%x%".into(),
        }
        .negate();
        assert_eq!(render(&p, false).sql, r#"NOT ("title" LIKE ?1)"#);
    }
}
