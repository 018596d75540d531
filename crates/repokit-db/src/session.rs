//! libSQL-backed persistence handle.

use std::sync::Arc;

use libsql::Builder;
use repokit_config::DatabaseConfig;
use repokit_core::Value;

use crate::error::DatabaseError;
use crate::handle::{PersistenceHandle, Statement};
use crate::record::Record;

/// A libSQL database and one connection to it.
///
/// The session does not own any schema; callers create tables with
/// [`Self::execute_batch`] or through their own tooling.
pub struct LibSqlSession {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LibSqlSession {
    /// Open a local database file, or `":memory:"`, with foreign keys enabled.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::connect(db, true).await
    }

    /// Open the database described by `config`.
    ///
    /// A remote URL with auth token wins over the local path.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Configuration` for an invalid config, or
    /// `DatabaseError` if the database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        config
            .validate()
            .map_err(|e| DatabaseError::Configuration(e.to_string()))?;

        let db = if config.is_remote() {
            tracing::debug!(url = %config.url, "opening remote database");
            Builder::new_remote(config.url.clone(), config.auth_token.clone())
                .build()
                .await?
        } else {
            tracing::debug!(path = %config.path, "opening local database");
            Builder::new_local(&config.path).build().await?
        };
        Self::connect(db, config.foreign_keys).await
    }

    async fn connect(db: libsql::Database, foreign_keys: bool) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        if foreign_keys {
            conn.execute("PRAGMA foreign_keys = ON", ())
                .await
                .map_err(|e| DatabaseError::Configuration(format!("PRAGMA foreign_keys: {e}")))?;
        }

        Ok(Self { db, conn })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a batch of `;`-separated statements, e.g. schema setup.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any statement fails.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), DatabaseError> {
        self.conn.execute_batch(sql).await?;
        Ok(())
    }
}

impl PersistenceHandle for LibSqlSession {
    async fn execute(&self, statement: &Statement) -> Result<u64, DatabaseError> {
        let params = statement.params.iter().map(to_libsql).collect::<Vec<_>>();
        Ok(self
            .conn
            .execute(&statement.sql, libsql::params_from_iter(params))
            .await?)
    }

    async fn query(&self, statement: &Statement) -> Result<Vec<Record>, DatabaseError> {
        let params = statement.params.iter().map(to_libsql).collect::<Vec<_>>();
        let mut rows = self
            .conn
            .query(&statement.sql, libsql::params_from_iter(params))
            .await?;

        let count = rows.column_count();
        let columns: Arc<[String]> = (0..count)
            .map(|i| rows.column_name(i).unwrap_or_default().to_string())
            .collect();

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            let values = (0..count)
                .map(|i| row.get_value(i).map(from_libsql))
                .collect::<Result<Vec<_>, _>>()?;
            records.push(Record::new(Arc::clone(&columns), values));
        }
        Ok(records)
    }
}

fn to_libsql(value: &Value) -> libsql::Value {
    match value {
        Value::Null => libsql::Value::Null,
        Value::Integer(i) => libsql::Value::Integer(*i),
        Value::Real(r) => libsql::Value::Real(*r),
        Value::Text(s) => libsql::Value::Text(s.clone()),
        Value::Blob(b) => libsql::Value::Blob(b.clone()),
    }
}

fn from_libsql(value: libsql::Value) -> Value {
    match value {
        libsql::Value::Null => Value::Null,
        libsql::Value::Integer(i) => Value::Integer(i),
        libsql::Value::Real(r) => Value::Real(r),
        libsql::Value::Text(s) => Value::Text(s),
        libsql::Value::Blob(b) => Value::Blob(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repokit_config::MEMORY_PATH;

    async fn test_session() -> LibSqlSession {
        let session = LibSqlSession::open_local(MEMORY_PATH).await.unwrap();
        session
            .execute_batch(
                "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT, weight REAL, raw BLOB);",
            )
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn values_roundtrip_through_libsql() {
        let session = test_session().await;
        let inserted = session
            .execute(&Statement::new(
                "INSERT INTO notes (id, body, weight, raw) VALUES (?1, ?2, ?3, ?4)",
                vec![
                    Value::Integer(1),
                    Value::Text("hello".into()),
                    Value::Real(0.5),
                    Value::Blob(vec![0xde, 0xad]),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        let rows = session
            .query(&Statement::new("SELECT id, body, weight, raw FROM notes", vec![]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].columns(), ["id", "body", "weight", "raw"]);
        assert_eq!(
            rows[0].values(),
            [
                Value::Integer(1),
                Value::Text("hello".into()),
                Value::Real(0.5),
                Value::Blob(vec![0xde, 0xad]),
            ]
        );
    }

    #[tokio::test]
    async fn nulls_are_preserved() {
        let session = test_session().await;
        session
            .execute(&Statement::new(
                "INSERT INTO notes (id, body) VALUES (?1, ?2)",
                vec![Value::Integer(2), Value::Null],
            ))
            .await
            .unwrap();
        let rows = session
            .query(&Statement::new("SELECT body FROM notes WHERE id = ?1", vec![Value::Integer(2)]))
            .await
            .unwrap();
        assert_eq!(rows[0].values(), [Value::Null]);
    }

    #[tokio::test]
    async fn open_from_default_config_is_in_memory() {
        let session = LibSqlSession::open(&DatabaseConfig::default()).await.unwrap();
        let rows = session
            .query(&Statement::new("PRAGMA foreign_keys", vec![]))
            .await
            .unwrap();
        assert_eq!(rows[0].get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn open_rejects_half_configured_remote() {
        let config = DatabaseConfig {
            url: "libsql://nowhere.turso.io".into(),
            ..Default::default()
        };
        let result = LibSqlSession::open(&config).await;
        assert!(matches!(result, Err(DatabaseError::Configuration(_))));
    }

    #[tokio::test]
    async fn sql_errors_propagate_unchanged() {
        let session = test_session().await;
        let result = session
            .query(&Statement::new("SELECT * FROM missing_table", vec![]))
            .await;
        assert!(matches!(result, Err(DatabaseError::LibSql(_))));
    }
}
