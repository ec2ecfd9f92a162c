//! Error types for chain-catalog
//!
//! Collaborators (storage, parquet reader, crawler, export) return `Result<T, Error>`.
//! The discovery facade is the only place these errors are swallowed.

use thiserror::Error;

/// The main error type for chain-catalog
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Storage listing failed for '{prefix}': {message}")]
    Listing { prefix: String, message: String },

    // ============================================================================
    // Parquet Errors
    // ============================================================================
    #[error("Schema read failed for '{key}': {message}")]
    SchemaRead { key: String, message: String },

    // ============================================================================
    // Crawler Errors
    // ============================================================================
    #[error("Crawler '{name}' is already running")]
    CrawlerRunning { name: String },

    #[error("Crawler '{name}' not found")]
    CrawlerNotFound { name: String },

    #[error("Crawler request failed: {message}")]
    Crawler { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a listing error
    pub fn listing(prefix: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Listing {
            prefix: prefix.into(),
            message: message.into(),
        }
    }

    /// Create a schema read error
    pub fn schema_read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaRead {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a crawler error
    pub fn crawler(message: impl Into<String>) -> Self {
        Self::Crawler {
            message: message.into(),
        }
    }

    /// True for the one failure the operator should see as a notice, not an error
    pub fn is_crawler_running(&self) -> bool {
        matches!(self, Error::CrawlerRunning { .. })
    }
}

/// Result type alias for chain-catalog
pub type Result<T> = std::result::Result<T, Error>;
