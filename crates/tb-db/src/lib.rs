//! tb-db - Database layer for Testbed
//!
//! This crate provides the `Database` driver trait, the DuckDB
//! implementation, the schema DDL builders, and `open`, which turns a
//! parsed DSN into a live connection.

pub mod ddl;
pub mod duckdb;
pub mod error;
pub mod provision;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use ddl::{create_schema_sql, drop_schema_sql};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use provision::{open, DefaultDriver, Driver};
pub use traits::Database;
