//! Schema DDL statements.
//!
//! Identifiers are generated from a DDL-safe alphabet and interpolated
//! without quoting.

use tb_core::Identifier;

/// `create schema <identifier>`
pub fn create_schema_sql(schema: &Identifier) -> String {
    format!("create schema {}", schema)
}

/// `drop schema <identifier> cascade`
pub fn drop_schema_sql(schema: &Identifier) -> String {
    format!("drop schema {} cascade", schema)
}
