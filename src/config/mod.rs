use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;
use crate::logging::LogLevel;

const ENV_PREFIX: &str = "ACCESS_LOG";
const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout_seconds: u64,
    pub cors_permissive: bool,
}

/// Settings for the request logger. Read once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Minimum severity that gets emitted.
    pub level: LogLevel,
    pub include_user_agent: bool,
    pub include_ip: bool,
    /// Paths matched exactly against the request path.
    pub exclude_routes: HashSet<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            timeout_seconds: 30,
            cors_permissive: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Log,
            include_user_agent: true,
            include_ip: false,
            exclude_routes: HashSet::from(["/health".to_string()]),
        }
    }
}

impl LoggingConfig {
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_routes.contains(path)
    }
}

impl AppConfig {
    /// Loads defaults, then the optional YAML file at `CONFIG_PATH`, then
    /// `ACCESS_LOG_*` environment variables and the `HOST` / `PORT` shortcuts.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut builder = Self::defaults()?
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("logging.exclude_routes")
                    .try_parsing(true),
            );

        // Override with environment variables if present
        if let Ok(host) = std::env::var("HOST") {
            builder = builder.set_override("server.host", host)?;
        }
        if let Ok(port) = std::env::var("PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Builds a config from an in-memory YAML document layered over the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let settings = Self::defaults()?
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let server = ServerConfig::default();
        let logging = LoggingConfig::default();
        let exclude_routes: Vec<String> = logging.exclude_routes.into_iter().collect();

        Ok(config::Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("server.timeout_seconds", server.timeout_seconds as i64)?
            .set_default("server.cors_permissive", server.cors_permissive)?
            .set_default("logging.enabled", logging.enabled)?
            .set_default("logging.level", logging.level.as_str())?
            .set_default("logging.include_user_agent", logging.include_user_agent)?
            .set_default("logging.include_ip", logging.include_ip)?
            .set_default("logging.exclude_routes", exclude_routes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_yaml_str("").unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.server.port, 3000);
        assert!(config.logging.is_excluded("/health"));
    }

    #[test]
    fn yaml_overrides_logging_section() {
        let config = AppConfig::from_yaml_str(
            r#"
logging:
  enabled: false
  level: warn
  include_ip: true
  exclude_routes:
    - /metrics
    - /favicon.ico
"#,
        )
        .unwrap();

        assert!(!config.logging.enabled);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.logging.include_ip);
        assert!(config.logging.include_user_agent);
        assert!(config.logging.is_excluded("/metrics"));
        assert!(!config.logging.is_excluded("/health"));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let result = AppConfig::from_yaml_str("logging:\n  level: verbose\n");
        assert!(result.is_err());
    }

    #[test]
    fn exclusion_is_exact_match() {
        let config = LoggingConfig::default();
        assert!(config.is_excluded("/health"));
        assert!(!config.is_excluded("/health/"));
        assert!(!config.is_excluded("/healthz"));
    }
}
