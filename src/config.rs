//! Application configuration loaded from an optional TOML file.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "dictionary.toml";

const DEFAULT_DATABASE_PATH: &str = "dictionary.sqlite3";
const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ROUTE: &str = "/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {0} not found")]
    Missing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_path: PathBuf,
    pub dictionary_base_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    /// Screen shown at startup: `/`, `/bookmarks` or `/quiz`
    pub initial_route: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            dictionary_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            initial_route: DEFAULT_ROUTE.to_string(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::Missing(path.to_path_buf())
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the config file, falling back to defaults.
///
/// A missing file is not an error. Any other failure is returned next to the
/// defaults so the caller can report it once logging is up.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Config, Option<ConfigError>) {
    match load_config_from_file(path) {
        Ok(config) => (config, None),
        Err(ConfigError::Missing(_)) => (Config::default(), None),
        Err(e) => (Config::default(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, err) = load_or_default(dir.path().join("absent.toml"));

        assert_eq!(config, Config::default());
        assert!(err.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.toml");
        fs::write(&path, "request_timeout_secs = 3\nlog_level = \"debug\"\n").unwrap();

        let config = load_config_from_file(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.dictionary_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.initial_route, "/");
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.toml");
        fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();

        let (config, err) = load_or_default(&path);
        assert_eq!(config, Config::default());
        assert!(matches!(err, Some(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
