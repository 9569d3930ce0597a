//! Relational store configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which repository adapter backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// MySQL server reached over TCP.
    #[default]
    Mysql,
    /// Embedded SQLite file.
    Sqlite,
    /// Process-local store, lost on restart.
    Memory,
}

impl DatabaseBackend {
    /// Backend name for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

/// Database configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Adapter to use.
    #[serde(default)]
    pub backend: DatabaseBackend,
    /// MySQL host.
    #[serde(default = "default_host")]
    pub host: String,
    /// MySQL port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// MySQL user.
    #[serde(default)]
    pub user: String,
    /// MySQL password.
    #[serde(default)]
    pub password: String,
    /// MySQL database name.
    #[serde(default)]
    pub name: String,
    /// SQLite database file.
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long a request may wait for a pooled connection.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    /// Create the `orders` table at startup if it is missing.
    #[serde(default)]
    pub ensure_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::default(),
            host: default_host(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            name: String::new(),
            sqlite_path: default_sqlite_path(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            ensure_schema: false,
        }
    }
}

impl DatabaseConfig {
    /// Pool acquire timeout.
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("sqlite_path", &self.sqlite_path)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("ensure_schema", &self.ensure_schema)
            .finish()
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    3306
}

fn default_sqlite_path() -> String {
    "./data/orders.db".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_acquire_timeout_secs() -> u64 {
    5
}
