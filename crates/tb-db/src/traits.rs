//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Driver abstraction used by the session controller and test bodies.
///
/// Implementations must be Send + Sync: one handle is shared between schema
/// DDL and every test in the session.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single statement, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute query returning row count (for tests)
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Query and return sample rows as formatted strings
    /// Returns up to `limit` rows, each as a comma-separated string
    async fn query_sample_rows(&self, sql: &str, limit: usize) -> DbResult<Vec<String>>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Check if a schema exists
    async fn schema_exists(&self, schema: &str) -> DbResult<bool>;

    /// Release the underlying connection.
    ///
    /// Every later call, including a second `close`, fails with
    /// [`DbError::Closed`](crate::DbError::Closed).
    async fn close(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
