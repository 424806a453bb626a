//! tb-session - Test session lifecycle for Testbed
//!
//! A session creates one uniquely named schema, hands control to a test
//! executor, drops the schema only when every test passed and dropping is
//! enabled, releases the connection, and maps the outcome to a process
//! exit status.
//!
//! ```text
//! Uninitialized -> SchemaCreated -> TestsRunning -> Resolved(Dropped | Retained) -> Closed
//! ```

pub mod bootstrap;
pub mod context;
pub mod controller;
pub mod error;
pub mod executor;
pub mod exit;
pub mod state;

pub use bootstrap::{run_session, run_session_with, try_run_session};
pub use context::SessionContext;
pub use controller::{SessionController, SessionReport};
pub use error::{SessionError, SessionResult};
pub use executor::{FnExecutor, TestExecutor};
pub use exit::ExitStatus;
pub use state::{Disposition, Resolution, RetainReason, SessionOutcome};
