//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend
///
/// The connection sits behind a `Mutex<Option<_>>`: statements are
/// serialized, and `close` takes the connection out exactly once.
pub struct DuckDbBackend {
    conn: Mutex<Option<Connection>>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(Some(conn)),
        }
    }

    /// Run `f` against the live connection
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> DbResult<T>) -> DbResult<T> {
        let guard = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;
        f(conn)
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        self.with_conn(|conn| {
            conn.execute(sql, [])
                .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
        })
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        self.with_conn(|conn| {
            conn.execute_batch(sql)
                .map_err(|e| DbError::ExecutionError(e.to_string()))
        })
    }

    /// Query count synchronously
    fn query_count_sync(&self, sql: &str) -> DbResult<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                    row.get(0)
                })
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
            Ok(count as usize)
        })
    }

    /// Fetch up to `limit` rows, each rendered as a comma-separated string
    fn query_sample_rows_sync(&self, sql: &str, limit: usize) -> DbResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT * FROM ({}) LIMIT {}", sql, limit))?;
            // column_count() panics before execution, read it from each row instead
            let rows = stmt
                .query_map([], |row| {
                    let col_count = row.as_ref().column_count();
                    Ok((0..col_count)
                        .map(|i| column_as_string(row, i))
                        .collect::<Vec<_>>()
                        .join(", "))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn count_sync(&self, sql: &str) -> DbResult<bool> {
        self.with_conn(|conn| {
            let count: i64 = conn
                .query_row(sql, [], |row| row.get(0))
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
            Ok(count > 0)
        })
    }

    /// Check if relation exists synchronously
    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = if let Some(pos) = name.rfind('.') {
            (&name[..pos], &name[pos + 1..])
        } else {
            ("main", name)
        };

        self.count_sync(&format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = '{}' AND table_name = '{}'",
            escape_literal(schema),
            escape_literal(table)
        ))
    }

    fn schema_exists_sync(&self, schema: &str) -> DbResult<bool> {
        self.count_sync(&format!(
            "SELECT COUNT(*) FROM information_schema.schemata WHERE schema_name = '{}'",
            escape_literal(schema)
        ))
    }

    fn close_sync(&self) -> DbResult<()> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        let conn = guard.take().ok_or(DbError::Closed)?;
        conn.close()
            .map_err(|(_, e)| DbError::ConnectionError(format!("close failed: {}", e)))
    }
}

/// Read a column as a String, trying text, integer, float and bool in turn.
fn column_as_string(row: &duckdb::Row<'_>, idx: usize) -> String {
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return s;
    }
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return n.to_string();
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return f.to_string();
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return b.to_string();
    }
    "null".to_string()
}

fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.query_count_sync(sql)
    }

    async fn query_sample_rows(&self, sql: &str, limit: usize) -> DbResult<Vec<String>> {
        self.query_sample_rows_sync(sql, limit)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn schema_exists(&self, schema: &str) -> DbResult<bool> {
        self.schema_exists_sync(schema)
    }

    async fn close(&self) -> DbResult<()> {
        self.close_sync()
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
