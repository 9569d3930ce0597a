//! Configuration module for the order service.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before any component is constructed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_service::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod database;
mod observability;
mod server;

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use database::{DatabaseBackend, DatabaseConfig};
pub use observability::{LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use server::ServerConfig;

/// Default configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration shipped with the service, used when no file is present.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../config.yaml");

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from `path`, falling back to the embedded default
/// when the file does not exist.
///
/// # Errors
///
/// Returns a `ConfigError` if the file exists but cannot be read, or if the
/// resulting configuration cannot be parsed or validated.
pub fn load_config_or_default(path: &str) -> Result<Config, ConfigError> {
    if std::path::Path::new(path).exists() {
        load_config(Some(path))
    } else {
        tracing::debug!(path, "config file not found, using embedded default");
        load_config_from_string(DEFAULT_CONFIG_YAML)
    }
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    let db = &config.database;
    if db.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }

    match db.backend {
        DatabaseBackend::Mysql => {
            let mut missing = Vec::new();
            if db.user.is_empty() {
                missing.push("database.user (DB_USER_NAME)");
            }
            if db.name.is_empty() {
                missing.push("database.name (DB_NAME)");
            }
            if !missing.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "mysql backend requires: {}",
                    missing.join(", ")
                )));
            }
        }
        DatabaseBackend::Sqlite => {
            if db.sqlite_path.is_empty() {
                return Err(ConfigError::ValidationError(
                    "database.sqlite_path must be set for the sqlite backend".to_string(),
                ));
            }
        }
        DatabaseBackend::Memory => {}
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    let metrics = &config.observability.metrics;
    if metrics.enabled {
        let addr: SocketAddr = metrics.listen_addr.parse().map_err(|e| {
            ConfigError::ValidationError(format!(
                "observability.metrics.listen_addr '{}' is invalid: {e}",
                metrics.listen_addr
            ))
        })?;
        if addr.port() == config.server.http_port {
            return Err(ConfigError::ValidationError(
                "metrics listen port and server.http_port must be different".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.database.backend, DatabaseBackend::Mysql);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.max_connections, 10);
        assert!(!config.database.ensure_schema);
        assert_eq!(config.observability.logging.format, "pretty");
        assert!(!config.observability.metrics.enabled);
    }

    #[test]
    fn test_load_minimal_memory_config() {
        let yaml = r"
database:
  backend: memory
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.server.http_port, 8000); // Default value
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "host: ${ORDER_SERVICE_CONFIG_TEST_NONEXISTENT_VAR:-localhost}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "host: localhost");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "user: ${ORDER_SERVICE_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "user: ");
    }

    #[test]
    fn test_repeated_variable_is_replaced_everywhere() {
        let input = "a: ${ORDER_SERVICE_CONFIG_TEST_REPEAT:-x}\nb: ${ORDER_SERVICE_CONFIG_TEST_REPEAT:-x}";
        assert_eq!(interpolate_env_vars(input), "a: x\nb: x");
    }

    #[test]
    fn test_validation_mysql_requires_credentials() {
        let yaml = r#"
database:
  backend: mysql
  user: "${ORDER_SERVICE_CONFIG_TEST_UNLIKELY_TO_EXIST}"
  name: ''
"#;

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for missing mysql credentials");
        };
        let message = err.to_string();
        assert!(message.contains("DB_USER_NAME"));
        assert!(message.contains("DB_NAME"));
    }

    #[test]
    fn test_validation_zero_port() {
        let yaml = r"
server:
  http_port: 0
database:
  backend: memory
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero port");
        };
        assert!(err.to_string().contains("http_port"));
    }

    #[test]
    fn test_validation_zero_connections() {
        let yaml = r"
database:
  backend: memory
  max_connections: 0
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero connections");
        };
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn test_validation_sqlite_requires_path() {
        let yaml = r"
database:
  backend: sqlite
  sqlite_path: ''
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for empty sqlite path");
        };
        assert!(err.to_string().contains("sqlite_path"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
database:
  backend: memory
observability:
  logging:
    format: xml
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_validation_metrics_port_clash() {
        let yaml = r#"
server:
  http_port: 9090
database:
  backend: memory
observability:
  metrics:
    enabled: true
    listen_addr: "0.0.0.0:9090"
"#;

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for clashing ports");
        };
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_validation_metrics_bad_addr() {
        let yaml = r#"
database:
  backend: memory
observability:
  metrics:
    enabled: true
    listen_addr: "not-an-address"
"#;

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for bad metrics address");
        };
        assert!(err.to_string().contains("listen_addr"));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
server:
  http_port: 8080
  bind_address: "127.0.0.1"

database:
  backend: mysql
  host: db.internal
  port: 3307
  user: orders
  password: secret
  name: shop
  max_connections: 4
  acquire_timeout_secs: 2
  ensure_schema: true

observability:
  logging:
    level: "debug"
    format: "json"
  metrics:
    enabled: true
    listen_addr: "127.0.0.1:9100"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.server.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.database.user, "orders");
        assert_eq!(config.database.name, "shop");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.acquire_timeout().as_secs(), 2);
        assert!(config.database.ensure_schema);
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.logging.format, "json");
        assert!(config.observability.metrics.enabled);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "database:\n  backend: memory\n").unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
    }

    #[test]
    fn test_embedded_default_is_well_formed() {
        let interpolated = interpolate_env_vars(DEFAULT_CONFIG_YAML);
        let config: Config = match serde_yaml_bw::from_str(&interpolated) {
            Ok(c) => c,
            Err(e) => panic!("embedded config should parse: {e}"),
        };
        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.database.port, 3306);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some("/nonexistent/order-service/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
