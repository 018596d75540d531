//! Shared test utilities for repokit-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::sync::{Arc, Mutex};

    use repokit_core::Value;

    use crate::error::DatabaseError;
    use crate::handle::{PersistenceHandle, Statement};
    use crate::record::Record;

    /// Build a record from column names and values.
    pub fn record(columns: &[&str], values: Vec<Value>) -> Record {
        let columns: Arc<[String]> = columns.iter().map(|c| (*c).to_string()).collect();
        Record::new(columns, values)
    }

    /// Handle that records every statement and answers queries with canned rows.
    #[derive(Debug, Default)]
    pub struct RecordingHandle {
        label: String,
        rows: Vec<Record>,
        affected: u64,
        seen: Mutex<Vec<Statement>>,
    }

    impl RecordingHandle {
        pub fn labelled(label: &str) -> Self {
            Self {
                label: label.to_string(),
                ..Self::default()
            }
        }

        pub fn with_rows(mut self, rows: Vec<Record>) -> Self {
            self.rows = rows;
            self
        }

        pub fn label(&self) -> &str {
            &self.label
        }

        /// Statements passed through this handle, in order.
        pub fn statements(&self) -> Vec<Statement> {
            self.seen.lock().unwrap().clone()
        }

        fn remember(&self, statement: &Statement) {
            self.seen.lock().unwrap().push(statement.clone());
        }
    }

    impl PersistenceHandle for RecordingHandle {
        async fn execute(&self, statement: &Statement) -> Result<u64, DatabaseError> {
            self.remember(statement);
            Ok(self.affected)
        }

        async fn query(&self, statement: &Statement) -> Result<Vec<Record>, DatabaseError> {
            self.remember(statement);
            Ok(self.rows.clone())
        }
    }
}
