//! Shared test utilities for tb-db

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory `Database` that records every statement it receives.
///
/// Statements starting with one of the configured failure prefixes are
/// recorded and then rejected with `DbError::ExecutionError`.
#[derive(Default)]
pub struct RecordingDatabase {
    statements: Mutex<Vec<String>>,
    fail_prefixes: Vec<String>,
    closes: AtomicUsize,
}

impl RecordingDatabase {
    /// A database that accepts every statement
    pub fn new() -> Self {
        Self::default()
    }

    /// A database that rejects statements starting with `prefix`
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_prefixes: vec![prefix.to_string()],
            ..Self::default()
        }
    }

    /// Every statement received so far, in order
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    /// Statements starting with `prefix`
    pub fn statements_starting_with(&self, prefix: &str) -> Vec<String> {
        self.statements()
            .into_iter()
            .filter(|s| s.starts_with(prefix))
            .collect()
    }

    /// Number of `close` calls
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn record(&self, sql: &str) -> DbResult<()> {
        self.statements.lock().unwrap().push(sql.to_string());
        if self.fail_prefixes.iter().any(|p| sql.starts_with(p)) {
            return Err(DbError::ExecutionError(format!("rejected: {}", sql)));
        }
        Ok(())
    }
}

#[async_trait]
impl Database for RecordingDatabase {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.record(sql).map(|_| 0)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.record(sql)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.record(sql).map(|_| 0)
    }

    async fn query_sample_rows(&self, sql: &str, _limit: usize) -> DbResult<Vec<String>> {
        self.record(sql).map(|_| Vec::new())
    }

    async fn relation_exists(&self, _name: &str) -> DbResult<bool> {
        Ok(false)
    }

    async fn schema_exists(&self, schema: &str) -> DbResult<bool> {
        let create = format!("create schema {}", schema);
        let drop = format!("drop schema {} cascade", schema);
        let statements = self.statements();
        let created = statements.iter().any(|s| *s == create);
        let dropped = statements.iter().any(|s| *s == drop);
        Ok(created && !dropped)
    }

    async fn close(&self) -> DbResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}
