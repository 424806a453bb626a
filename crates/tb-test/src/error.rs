//! Error types for tb-test

use thiserror::Error;

/// Suite discovery and rendering errors
#[derive(Error, Debug)]
pub enum SuiteError {
    /// T001: Suite directory does not exist
    #[error("[T001] Test suite directory not found: {path}")]
    SuiteNotFound { path: String },

    /// T002: Suite directory contains no tests
    #[error("[T002] No .sql tests found in {path}")]
    EmptySuite { path: String },

    /// T003: Invalid glob pattern or unreadable entry
    #[error("[T003] Failed to discover tests in {path}: {message}")]
    Discovery { path: String, message: String },

    /// T004: Template rendering failed
    #[error("[T004] Failed to render {name}: {message}")]
    Render { name: String, message: String },

    /// T005: Setup script failed
    #[error("[T005] Suite setup failed: {0}")]
    Setup(String),

    /// T006: IO error with file path context
    #[error("[T006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for SuiteError
pub type SuiteResult<T> = Result<T, SuiteError>;
