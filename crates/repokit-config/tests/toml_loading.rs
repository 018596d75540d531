//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use repokit_config::{ConfigError, RepoConfig};

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "./state.db"
foreign_keys = false
"#,
        )?;

        let config: RepoConfig = Figment::from(Serialized::defaults(RepoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "./state.db");
        assert!(!config.database.foreign_keys);
        assert!(!config.database.is_remote());
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".repokit")?;
        jail.create_file(
            ".repokit/config.toml",
            r#"
[database]
url = "libsql://local-file.turso.io"
auth_token = "from-file"
"#,
        )?;

        let config = RepoConfig::load().expect("config loads");
        assert_eq!(config.database.url, "libsql://local-file.turso.io");
        assert!(config.database.is_remote());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "./from-toml.db"
"#,
        )?;
        jail.set_env("REPOKIT_DATABASE__PATH", "./from-env.db");

        let config: RepoConfig = Figment::from(Serialized::defaults(RepoConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("REPOKIT_").split("__"))
            .extract()?;

        assert_eq!(config.database.path, "./from-env.db");
        Ok(())
    });
}

#[test]
fn load_reads_prefixed_env() {
    Jail::expect_with(|jail| {
        jail.set_env("REPOKIT_DATABASE__URL", "libsql://env.turso.io");
        jail.set_env("REPOKIT_DATABASE__AUTH_TOKEN", "env-token");
        jail.set_env("REPOKIT_DATABASE__FOREIGN_KEYS", "false");

        let config = RepoConfig::load().expect("config loads");
        assert_eq!(config.database.url, "libsql://env.turso.io");
        assert_eq!(config.database.auth_token, "env-token");
        assert!(!config.database.foreign_keys);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn half_configured_remote_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("REPOKIT_DATABASE__URL", "libsql://env.turso.io");

        let config = RepoConfig::load().expect("config loads");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("REPOKIT_DATABASE__FOREIGN_KEYS", "not-a-bool");

        let err = RepoConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
