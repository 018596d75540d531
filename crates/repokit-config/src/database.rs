//! Database handle configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Path used when nothing is configured: a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

fn default_path() -> String {
    MEMORY_PATH.to_string()
}

const fn default_foreign_keys() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://mydb.turso.io`). Takes precedence
    /// over `path` when set together with `auth_token`.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Whether to enable `PRAGMA foreign_keys` on every connection.
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
            foreign_keys: default_foreign_keys(),
        }
    }
}

impl DatabaseConfig {
    /// Check if both remote fields are present.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Check if the local path points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    /// Reject half-configured remotes and empty local paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.is_empty() && self.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.auth_token".into(),
                reason: "a remote url requires an auth token".into(),
            });
        }
        if self.url.is_empty() && !self.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.url".into(),
                reason: "an auth token was given without a remote url".into(),
            });
        }
        if !self.is_remote() && self.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
