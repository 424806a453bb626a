//! Connection provisioning from a parsed DSN.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::traits::Database;
use std::sync::Arc;
use tb_core::dsn::{Dsn, DsnTarget, DUCKDB_SCHEME};

/// Driver collaborator: turns a DSN into a live connection.
///
/// The session bootstrap goes through this trait so tests can substitute
/// drivers that fail or record.
pub trait Driver: Send + Sync {
    /// Open a connection for `dsn`
    fn open(&self, dsn: &Dsn) -> DbResult<Arc<dyn Database>>;
}

/// Driver that dispatches on the DSN scheme to the built-in backends.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDriver;

impl Driver for DefaultDriver {
    fn open(&self, dsn: &Dsn) -> DbResult<Arc<dyn Database>> {
        open(dsn)
    }
}

/// Open a connection for `dsn`.
///
/// Performs no schema work. The caller owns the handle and must call
/// [`Database::close`] exactly once.
pub fn open(dsn: &Dsn) -> DbResult<Arc<dyn Database>> {
    log::debug!("Opening {} connection for {}", dsn.scheme(), dsn);
    match dsn.scheme() {
        DUCKDB_SCHEME => {
            let backend = match dsn.target() {
                DsnTarget::Memory => DuckDbBackend::in_memory()?,
                DsnTarget::Path(path) => DuckDbBackend::from_path(path)?,
            };
            Ok(Arc::new(backend))
        }
        other => Err(DbError::ConnectionError(format!(
            "no driver registered for scheme '{}'",
            other
        ))),
    }
}
