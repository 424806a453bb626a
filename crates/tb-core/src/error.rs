//! Error types for tb-core

use thiserror::Error;

/// Core error type for Testbed
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Malformed or unsupported DSN
    #[error("[C003] Invalid DSN '{dsn}': {reason}")]
    InvalidDsn { dsn: String, reason: String },

    /// C004: Identifier prefix outside the DDL-safe alphabet
    #[error("[C004] Invalid identifier prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    /// C005: IO error with file path context
    #[error("[C005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C006: YAML parsing error
    #[error("[C006] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
