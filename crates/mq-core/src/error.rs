//! Error types for mq-core

use thiserror::Error;

/// Core error type for MigrationIQ
#[derive(Error, Debug)]
pub enum CoreError {
    /// MQ001: Configuration file not found
    #[error("[MQ001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// MQ002: Failed to parse configuration file
    #[error("[MQ002] Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: String,
        source: serde_yaml::Error,
    },

    /// MQ003: Invalid configuration value
    #[error("[MQ003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// MQ004: The migration graph has at least one cycle
    #[error("[MQ004] Migration graph contains cycles, topological sort is impossible (unresolved: {unresolved})")]
    CycleDetected { unresolved: String },

    /// MQ005: IO error with file path context
    #[error("[MQ005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
