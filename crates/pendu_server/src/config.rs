//! Server configuration loaded from TOML.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Configuration file read when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "pendu.toml";

/// Settings shared by the REST server and the terminal client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database file.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// External word list; the embedded list is used when absent.
    #[serde(default)]
    words_path: Option<PathBuf>,

    /// Seconds a game session is kept after it starts.
    #[serde(default = "default_session_ttl_secs")]
    session_ttl_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> String {
    "pendu.db".to_string()
}

fn default_session_ttl_secs() -> u64 {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            words_path: None,
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(host = %config.host, port = config.port, db_path = %config.db_path, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Session lifetime, saturating at [`TimeDelta::MAX`].
    pub fn session_ttl(&self) -> TimeDelta {
        i64::try_from(self.session_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        db_path: Option<String>,
        words_path: Option<PathBuf>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if words_path.is_some() {
            self.words_path = words_path;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ServerConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port(), &8000);
    }

    #[test]
    fn file_values_then_overrides() {
        let config = ServerConfig::from_toml_str("port = 9000\ndb_path = \"games.db\"")
            .expect("config parses")
            .with_overrides(Some("0.0.0.0".to_string()), None, None, None);
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(*config.port(), 9000);
        assert_eq!(config.db_path(), "games.db");
        assert!(config.words_path().is_none());
    }

    #[test]
    fn session_ttl_defaults_to_one_hour() {
        assert_eq!(*ServerConfig::default().session_ttl_secs(), 3600);
        let config = ServerConfig::from_toml_str("session_ttl_secs = 600").expect("config parses");
        assert_eq!(*config.session_ttl_secs(), 600);
        assert_eq!(config.session_ttl(), TimeDelta::minutes(10));
        assert_eq!(config.port(), &8000);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ServerConfig::from_toml_str("port = \"high\"").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let config = ServerConfig::load_or_default("/nonexistent/pendu.toml").expect("defaults");
        assert_eq!(config, ServerConfig::default());
    }
}
