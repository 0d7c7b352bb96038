//! Configuration management for the todo service
//!
//! Supports configuration via:
//! - Environment variables (primary)
//! - Optional TOML config file (secondary)
//!
//! Environment variables take precedence over config file values.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// MongoDB connection string (default: mongodb://localhost:27017/)
    #[serde(default = "default_mongo_uri")]
    pub uri: String,

    /// Database name (default: demo_todo)
    #[serde(default = "default_db_name")]
    pub database: String,

    /// Collection name (default: todo)
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017/".to_string()
}

fn default_db_name() -> String {
    "demo_todo".to_string()
}

fn default_collection() -> String {
    "todo".to_string()
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: 0.0.0.0:9000)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Shutdown grace period in seconds (default: 5)
    #[serde(default = "default_grace_period_secs")]
    pub grace_period_secs: u64,
}

fn default_bind_address() -> SocketAddr {
    "0.0.0.0:9000".parse().unwrap()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_grace_period_secs() -> u64 {
    5
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default = "default_server_config")]
    pub server: ServerConfig,

    /// Document store configuration
    #[serde(default = "default_storage_config")]
    pub storage: StorageConfig,

    /// Log level (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_server_config() -> ServerConfig {
    ServerConfig {
        bind_address: default_bind_address(),
        timeout_secs: default_timeout_secs(),
        grace_period_secs: default_grace_period_secs(),
    }
}

fn default_storage_config() -> StorageConfig {
    StorageConfig {
        uri: default_mongo_uri(),
        database: default_db_name(),
        collection: default_collection(),
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - TODO_API_MONGO_URI: MongoDB connection string
    /// - TODO_API_DB_NAME: database name
    /// - TODO_API_COLLECTION: collection name
    /// - TODO_API_BIND_ADDRESS: server bind address (default: 0.0.0.0:9000)
    /// - TODO_API_TIMEOUT_SECS: request timeout (default: 60)
    /// - TODO_API_GRACE_PERIOD_SECS: shutdown grace period (default: 5)
    /// - TODO_API_LOG_LEVEL: log level (default: info)
    /// - TODO_API_CONFIG_FILE: optional path to TOML config file
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Try to load from config file first if specified
        let config_file = std::env::var("TODO_API_CONFIG_FILE").ok();
        let mut config = if let Some(path) = &config_file {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        // Override with environment variables
        if let Ok(uri) = std::env::var("TODO_API_MONGO_URI") {
            config.storage.uri = uri;
        }

        if let Ok(database) = std::env::var("TODO_API_DB_NAME") {
            config.storage.database = database;
        }

        if let Ok(collection) = std::env::var("TODO_API_COLLECTION") {
            config.storage.collection = collection;
        }

        if let Ok(addr) = std::env::var("TODO_API_BIND_ADDRESS") {
            config.server.bind_address = addr.parse()?;
        }

        if let Ok(timeout) = std::env::var("TODO_API_TIMEOUT_SECS") {
            config.server.timeout_secs = timeout.parse()?;
        }

        if let Ok(grace) = std::env::var("TODO_API_GRACE_PERIOD_SECS") {
            config.server.grace_period_secs = grace.parse()?;
        }

        if let Ok(level) = std::env::var("TODO_API_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default configuration
    pub fn default() -> Self {
        Self {
            server: default_server_config(),
            storage: default_storage_config(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_address.port(), 9000);
        assert_eq!(config.server.timeout_secs, 60);
        assert_eq!(config.server.grace_period_secs, 5);
        assert_eq!(config.storage.uri, "mongodb://localhost:27017/");
        assert_eq!(config.storage.database, "demo_todo");
        assert_eq!(config.storage.collection, "todo");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            uri = "mongodb://db.internal:27017/"
            database = "todos_prod"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.uri, "mongodb://db.internal:27017/");
        assert_eq!(config.storage.database, "todos_prod");
        assert_eq!(config.storage.collection, "todo");
        assert_eq!(config.server.timeout_secs, 60);
    }
}
