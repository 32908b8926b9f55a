use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";
const DEFAULT_DATABASE_FILE: &str = "catalog.db";

/// Settings handed to the persistence provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:`
    pub path: Option<String>,
    /// Full connection url; takes precedence over `path`
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// Echo every statement through sqlx's logger at debug level
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 5,
            sqlx_logging: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn with_database_path(mut self, path: Option<String>) -> Self {
        if path.is_some() {
            self.database.path = path;
            self.database.url = None;
        }
        self
    }
}

impl DatabaseConfig {
    pub fn database_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        get_database_url(self.path.as_deref())
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url().contains(":memory:")
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(":memory:") => "sqlite::memory:".to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => format!("sqlite://{}?mode=rwc", DEFAULT_DATABASE_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_database_url_resolution() {
        assert_eq!(get_database_url(Some(":memory:")), "sqlite::memory:");
        assert_eq!(
            get_database_url(Some("/tmp/shop.db")),
            "sqlite:///tmp/shop.db?mode=rwc"
        );
        assert_eq!(get_database_url(None), "sqlite://catalog.db?mode=rwc");
    }

    #[test]
    fn test_explicit_url_wins_over_path() {
        let config = DatabaseConfig {
            path: Some("ignored.db".to_string()),
            url: Some("sqlite::memory:".to_string()),
            ..Default::default()
        };
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[database]
path = "sales.db"
sqlx_logging = true
"#,
        )
        .unwrap();

        assert_eq!(config.database.path.as_deref(), Some("sales.db"));
        assert!(config.database.sqlx_logging);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_example_config_parses() {
        let config = AppConfig::from_toml_str(include_str!("../catalog.example.toml")).unwrap();
        assert_eq!(
            config.database.database_url(),
            "sqlite://catalog.db?mode=rwc"
        );
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("/nonexistent/catalog.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database\npath = 3").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_cli_path_overrides_config_url() {
        let config = AppConfig::from_toml_str("[database]\nurl = \"sqlite::memory:\"\n")
            .unwrap()
            .with_database_path(Some("override.db".to_string()));

        assert_eq!(
            config.database.database_url(),
            "sqlite://override.db?mode=rwc"
        );
    }
}
