use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Password never lives in the config file.
pub const PASSWORD_ENV_VAR: &str = "GEMDASH_DB_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            database: "Vulcynyx".to_string(),
            user: "root".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config directory is unavailable for this platform")]
    ConfigDirUnavailable,
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl AppConfig {
    /// Loads the fixed startup configuration. A missing file yields the
    /// built-in defaults so a fresh checkout can run against a local
    /// development database.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_path(default_config_path()?)
    }

    pub fn load_from_path(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Reads the database password from the environment, treating an empty
/// value as absent.
#[must_use]
pub fn database_password() -> Option<String> {
    env::var(PASSWORD_ENV_VAR).ok().filter(|pw| !pw.is_empty())
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn default_audit_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("audit.ndjson"))
}

fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = if let Some(custom) = env::var_os("GEMDASH_CONFIG_DIR") {
        PathBuf::from(custom)
    } else if cfg!(target_os = "windows") {
        env::var_os("APPDATA")
            .map(PathBuf::from)
            .ok_or(ConfigError::ConfigDirUnavailable)?
    } else if let Some(xdg_config_home) = env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config_home)
    } else {
        let home = env::var_os("HOME").ok_or(ConfigError::ConfigDirUnavailable)?;
        PathBuf::from(home).join(".config")
    };

    Ok(base_dir.join("gemdash"))
}

/// Persists a config file, creating parent directories as needed. Used by
/// tests and first-run setup tooling rather than the app itself; the app
/// never rewrites its configuration at runtime.
pub fn write_config(path: &Path, config: &AppConfig) -> Result<(), std::io::Error> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir)?;
    }
    let rendered = toml::to_string_pretty(config).map_err(std::io::Error::other)?;
    fs::write(path, rendered)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{write_config, AppConfig, ConnectionConfig};

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let path = temp_dir.path().join("config.toml");

        let config = AppConfig::load_from_path(path).expect("failed to load config");
        assert_eq!(config.connection, ConnectionConfig::default());
        assert_eq!(config.connection.database, "Vulcynyx");
        assert_eq!(config.connection.port, 3306);
    }

    #[test]
    fn round_trips_through_toml() {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = AppConfig {
            connection: ConnectionConfig {
                host: "db.internal".to_string(),
                port: 3307,
                database: "jewellery".to_string(),
                user: "dashboard".to_string(),
            },
        };
        write_config(&path, &config).expect("failed to write config");

        let loaded = AppConfig::load_from_path(&path).expect("failed to reload config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_config_file_fills_remaining_defaults() {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[connection]\nhost = \"10.0.0.5\"\n")
            .expect("failed to write config");

        let loaded = AppConfig::load_from_path(&path).expect("failed to load config");
        assert_eq!(loaded.connection.host, "10.0.0.5");
        assert_eq!(loaded.connection.user, "root");
        assert_eq!(loaded.connection.database, "Vulcynyx");
    }
}
