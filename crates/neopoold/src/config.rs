//! Configuration file parsing and structures.
//!
//! neopoold uses a single flat TOML file, read once at startup. Integrations
//! are enabled by the presence of their section under `[integrations]`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tracing_subscriber::filter::LevelFilter;

use crate::integrations::neopool::NeoPoolConfig;

/// Top-level configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default)]
    pub level: LogLevel,
}

/// HTTP API configuration
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Address to listen on
    #[serde(default = "default_api_listen")]
    pub listen: String,

    /// Port to listen on
    #[serde(default = "default_api_port")]
    pub port: u16,
}

fn default_api_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8565
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen: default_api_listen(),
            port: default_api_port(),
        }
    }
}

/// Integration configuration container
#[derive(Debug, Default, Deserialize)]
pub struct IntegrationsConfig {
    /// NeoPool bridge integration; absent means disabled
    #[serde(default)]
    pub neopool: Option<NeoPoolConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().to_path_buf(), e))?;

        toml::from_str(&contents).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
            [logging]
            level = "info"

            [integrations]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.api.listen, "127.0.0.1");
        assert_eq!(config.api.port, 8565);
        assert!(config.integrations.neopool.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.integrations.neopool.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [logging]
            level = "debug"

            [api]
            listen = "0.0.0.0"
            port = 9000

            [integrations.neopool]
            broker = "broker.local"
            client_id = "neopoold"
            node_id = "ABC123"
            device_topic = "SmartPool"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.api.port, 9000);

        let neopool = config.integrations.neopool.unwrap();
        assert_eq!(neopool.broker, "broker.local");
        assert_eq!(neopool.node_id, "ABC123");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [logging]
            level = "warn"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/nonexistent/neopoold.toml");
        assert!(matches!(result, Err(ConfigError::Io(_, _))));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [logging]
            level = "verbose"
            "#,
        );
        assert!(result.is_err());
    }
}
