//! Ontoload Configuration Management
//!
//! Handles configuration from environment variables and config files
//! with sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Artifact fetching configuration
    pub fetch: FetchConfig,

    /// Document store connection
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Fetcher
        if let Ok(dir) = std::env::var("ONTOLOAD_CACHE_DIR") {
            config.fetch.cache_root = PathBuf::from(dir);
        }
        if let Ok(prefix) = std::env::var("ONTOLOAD_URL_PREFIX") {
            config.fetch.url_prefix = prefix;
        }

        // SurrealDB
        if let Ok(url) = std::env::var("SURREALDB_URL") {
            config.store.url = url;
        }
        if let Ok(user) = std::env::var("SURREALDB_USER") {
            config.store.user = user;
        }
        if let Ok(pass) = std::env::var("SURREALDB_PASS") {
            config.store.pass = pass;
        }
        if let Ok(ns) = std::env::var("SURREALDB_NAMESPACE") {
            config.store.namespace = ns;
        }
        if let Ok(db) = std::env::var("SURREALDB_DATABASE") {
            config.store.database = db;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;

        if env_config.fetch.cache_root != FetchConfig::default().cache_root {
            self.fetch.cache_root = env_config.fetch.cache_root;
        }
        if env_config.fetch.url_prefix != FetchConfig::default().url_prefix {
            self.fetch.url_prefix = env_config.fetch.url_prefix;
        }

        // Always use env for credentials
        if env_config.store.user != StoreConfig::default().user {
            self.store.user = env_config.store.user;
        }
        if env_config.store.pass != StoreConfig::default().pass {
            self.store.pass = env_config.store.pass;
        }

        Ok(self)
    }
}

/// Artifact fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Root directory for per-ontology cache directories
    pub cache_root: PathBuf,

    /// URL prefix the artifact name is appended to
    pub url_prefix: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let cache_root = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("ontoload");

        Self {
            cache_root,
            url_prefix: "https://s3.amazonaws.com/bbop-sqlite/".to_string(),
        }
    }
}

/// Document store connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SurrealDB WebSocket URL
    pub url: String,

    /// SurrealDB username
    pub user: String,

    /// SurrealDB password
    pub pass: String,

    /// SurrealDB namespace
    pub namespace: String,

    /// SurrealDB database name
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:8000".to_string(),
            user: "root".to_string(),
            pass: "root".to_string(),
            namespace: "ontoload".to_string(),
            database: "ontology".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
