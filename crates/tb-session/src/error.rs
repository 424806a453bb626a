//! Error types for tb-session

use tb_core::{CoreError, Identifier};
use tb_db::DbError;
use tb_proxy::ProxyError;
use thiserror::Error;

/// Fatal session errors.
///
/// Each variant names the step that failed. Test failures are not errors,
/// and neither is a failed schema drop after a passing run.
#[derive(Error, Debug)]
pub enum SessionError {
    /// S001: Configuration could not be resolved
    #[error("[S001] Configuration failed: {0}")]
    Config(#[from] CoreError),

    /// S002: Proxy listener could not be bound
    #[error("[S002] Proxy bootstrap failed: {0}")]
    ProxyBind(#[source] ProxyError),

    /// S003: Database connection could not be opened
    #[error("[S003] Connection failed: {0}")]
    Connection(#[source] DbError),

    /// S004: Test schema could not be created
    #[error("[S004] Failed to create schema {schema}: {source}")]
    SchemaCreate {
        schema: Identifier,
        #[source]
        source: DbError,
    },
}

/// Result type alias for SessionError
pub type SessionResult<T> = Result<T, SessionError>;
