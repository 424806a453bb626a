//! tb-test - SQL test suites for Testbed
//!
//! A suite is a directory of `.sql` files. Each file is a minijinja
//! template rendered with `schema` bound to the session schema, and passes
//! when its query returns no rows. An optional `setup.sql` at the suite
//! root runs first.

pub mod error;
pub mod executor;
pub mod runner;
pub mod suite;

pub use error::{SuiteError, SuiteResult};
pub use executor::SqlSuiteExecutor;
pub use runner::{TestResult, TestRunner, TestStatus, TestSummary};
pub use suite::{RenderedTest, SqlSuite, SqlTest};
