use std::{env, fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown storage backend '{0}' (expected sqlite, dynamodb or memory)")]
    UnknownBackend(String),
}

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Sqlite,
    DynamoDb,
    Memory,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "dynamodb" => Ok(Self::DynamoDb),
            "memory" | "inmemory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sqlite => "sqlite",
            Self::DynamoDb => "dynamodb",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Active storage backend (default: sqlite)
    pub backend: BackendKind,
    /// Path to SQLite database file (default: "walktrack.db")
    pub sqlite_path: String,
    /// DynamoDB table name (default: "walktrack")
    pub dynamodb_table_name: String,
    /// DynamoDB endpoint override, for local emulators.
    pub dynamodb_endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STORAGE_BACKEND` - `sqlite`, `dynamodb` or `memory` (default: sqlite)
    /// - `SQLITE_PATH` - SQLite database path (default: "walktrack.db")
    /// - `DYNAMODB_TABLE_NAME` - DynamoDB table name (default: "walktrack")
    /// - `DYNAMODB_ENDPOINT_URL` - DynamoDB endpoint override (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match env::var("STORAGE_BACKEND") {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => BackendKind::default(),
        };

        Ok(Self {
            backend,
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "walktrack.db".to_string()),
            dynamodb_table_name: env::var("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|_| "walktrack".to_string()),
            dynamodb_endpoint_url: env::var("DYNAMODB_ENDPOINT_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }

    /// Replace the configured backend, e.g. from a CLI flag.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }
}
