use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ExportError, Result};

/// Which database to export, loaded from `config.toml`.
///
/// ```toml
/// db = "sqlite"
///
/// [sqlite]
/// file = "data/next-terminal.db"
///
/// [mysql]
/// hostname = "127.0.0.1"
/// port = 3306
/// username = "next-terminal"
/// password = "..."
/// database = "next-terminal"
/// ```
///
/// Only the section named by `db` is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Database backend name: `sqlite` or `mysql`.
    #[serde(default = "default_db")]
    pub db: String,

    #[serde(default)]
    pub sqlite: SqliteSettings,

    #[serde(default)]
    pub mysql: MysqlSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteSettings {
    /// Path to the gateway's SQLite file, relative to the working directory.
    #[serde(default = "default_sqlite_file")]
    pub file: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MysqlSettings {
    #[serde(default = "default_mysql_hostname")]
    pub hostname: String,

    #[serde(default = "default_mysql_port")]
    pub port: u16,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Schema holding the gateway's tables.
    #[serde(default)]
    pub database: String,
}

/// A resolved, supported backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Sqlite(PathBuf),
    Mysql(MysqlSettings),
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_db() -> String {
    "sqlite".to_string()
}

fn default_sqlite_file() -> String {
    "next-terminal.db".to_string()
}

fn default_mysql_hostname() -> String {
    "127.0.0.1".to_string()
}

fn default_mysql_port() -> u16 {
    3306
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            file: default_sqlite_file(),
        }
    }
}

impl Default for MysqlSettings {
    fn default() -> Self {
        Self {
            hostname: default_mysql_hostname(),
            port: default_mysql_port(),
            username: String::new(),
            password: String::new(),
            database: String::new(),
        }
    }
}

// The password stays out of logs and error output.
impl fmt::Debug for MysqlSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlSettings")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db: default_db(),
            sqlite: SqliteSettings::default(),
            mysql: MysqlSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from an explicit config file path.
    ///
    /// Unlike an optional project config, a missing file is an error: the
    /// operator pointed us at it.
    pub fn load(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            ExportError::ConfigError(format!("cannot read {}: {e}", config_path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            ExportError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Resolve the configured backend.
    pub fn backend(&self) -> Result<Backend> {
        match self.db.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite(PathBuf::from(&self.sqlite.file))),
            "mysql" => {
                if self.mysql.database.trim().is_empty() {
                    return Err(ExportError::ConfigError(
                        "db = \"mysql\" requires [mysql] database".into(),
                    ));
                }
                Ok(Backend::Mysql(self.mysql.clone()))
            }
            other => Err(ExportError::ConfigError(format!(
                "unsupported database backend '{other}'"
            ))),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.db, "sqlite");
        assert_eq!(s.sqlite.file, "next-terminal.db");
    }

    #[test]
    fn load_errors_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let result = Settings::load(&tmp.path().join("config.toml"));
        assert!(matches!(result, Err(ExportError::ConfigError(_))));
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let config = r#"
db = "sqlite"

[sqlite]
file = "data/sqlite/next-terminal.db"
"#;
        fs::write(&path, config).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(
            settings.backend().unwrap(),
            Backend::Sqlite(PathBuf::from("data/sqlite/next-terminal.db"))
        );
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.db, "sqlite");
        assert_eq!(settings.sqlite.file, "next-terminal.db");
    }

    #[test]
    fn mysql_section_is_ignored_for_sqlite() {
        let config = r#"
db = "sqlite"
[mysql]
hostname = "localhost"
password = "x"
"#;
        let settings: Settings = toml::from_str(config).unwrap();
        assert_eq!(
            settings.backend().unwrap(),
            Backend::Sqlite(PathBuf::from("next-terminal.db"))
        );
    }

    #[test]
    fn load_parses_mysql_section() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let config = r#"
db = "mysql"

[mysql]
hostname = "db.internal"
port = 3307
username = "nt"
password = "s3cret"
database = "next-terminal"
"#;
        fs::write(&path, config).unwrap();

        let Backend::Mysql(mysql) = Settings::load(&path).unwrap().backend().unwrap() else {
            panic!("expected a mysql backend");
        };
        assert_eq!(mysql.hostname, "db.internal");
        assert_eq!(mysql.port, 3307);
        assert_eq!(mysql.username, "nt");
        assert_eq!(mysql.password, "s3cret");
        assert_eq!(mysql.database, "next-terminal");
    }

    #[test]
    fn mysql_defaults_host_and_port() {
        let settings: Settings = toml::from_str(
            "db = \"MySQL\"\n[mysql]\ndatabase = \"nt\"\n",
        )
        .unwrap();
        let Backend::Mysql(mysql) = settings.backend().unwrap() else {
            panic!("expected a mysql backend");
        };
        assert_eq!(mysql.hostname, "127.0.0.1");
        assert_eq!(mysql.port, 3306);
    }

    #[test]
    fn mysql_without_database_is_rejected() {
        let settings: Settings = toml::from_str("db = \"mysql\"\n").unwrap();
        assert!(matches!(settings.backend(), Err(ExportError::ConfigError(_))));
    }

    #[test]
    fn mysql_password_is_not_debug_printed() {
        let mysql = MysqlSettings {
            password: "s3cret".into(),
            ..MysqlSettings::default()
        };
        assert!(!format!("{mysql:?}").contains("s3cret"));
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not valid {{toml").unwrap();

        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn unsupported_backends_are_rejected() {
        for db in ["postgres", ""] {
            let s = Settings {
                db: db.into(),
                ..Settings::default()
            };
            assert!(matches!(s.backend(), Err(ExportError::ConfigError(_))));
        }
    }
}
