//! Schema lifecycle controller
//!
//! Drives one session through its states in a fixed order:
//!
//! 1. create `<prefix><random>` with `create schema <id>`; failure aborts
//!    before any test runs
//! 2. hand a [`SessionContext`] to the executor and wait for its exit code
//! 3. if the run passed and dropping is enabled, `drop schema <id> cascade`;
//!    otherwise keep the schema for inspection
//! 4. close the connection, whichever way the earlier steps went

use crate::context::SessionContext;
use crate::error::{SessionError, SessionResult};
use crate::executor::TestExecutor;
use crate::state::{Disposition, Resolution, RetainReason, SessionOutcome, SessionState};
use futures::FutureExt;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tb_core::identifier::TEST_SCHEMA_PREFIX;
use tb_core::Identifier;
use tb_db::{create_schema_sql, drop_schema_sql, Database};

/// Exit code recorded when the executor panics instead of returning
pub const PANIC_EXIT_CODE: i32 = 101;

/// What a completed session did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Name of the test schema
    pub schema: Identifier,

    /// Aggregate test result
    pub outcome: SessionOutcome,

    /// Whether the schema was dropped, and if not, why
    pub resolution: Resolution,
}

/// Owns the test schema for one session.
///
/// Nothing else creates or drops the schema. The steps are private and only
/// reachable through [`run`](Self::run), so the create, test, drop, close
/// order cannot be violated.
pub struct SessionController {
    db: Arc<dyn Database>,
    drop_schema: bool,
    schema_prefix: String,
    proxy_addr: Option<SocketAddr>,
    state: SessionState,
}

impl SessionController {
    /// Create a controller over an open connection
    pub fn new(db: Arc<dyn Database>, drop_schema: bool) -> Self {
        Self {
            db,
            drop_schema,
            schema_prefix: TEST_SCHEMA_PREFIX.to_string(),
            proxy_addr: None,
            state: SessionState::Uninitialized,
        }
    }

    /// Override the schema name prefix.
    ///
    /// Characters outside `[a-z0-9_]` are replaced when the name is generated.
    pub fn with_schema_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.schema_prefix = prefix.into();
        self
    }

    /// Advertise the forwarding proxy to test bodies
    pub fn with_proxy_addr(mut self, addr: SocketAddr) -> Self {
        self.proxy_addr = Some(addr);
        self
    }

    /// Run the whole session.
    ///
    /// The connection is closed before returning, on success and on every
    /// error path.
    pub async fn run(mut self, executor: &dyn TestExecutor) -> SessionResult<SessionReport> {
        let result = self.drive(executor).await;
        self.close().await;
        result
    }

    async fn drive(&mut self, executor: &dyn TestExecutor) -> SessionResult<SessionReport> {
        let schema = self.create_schema().await?;
        let outcome = self.run_tests(&schema, executor).await;
        let resolution = self.resolve(&schema, outcome).await;
        Ok(SessionReport {
            schema,
            outcome,
            resolution,
        })
    }

    fn transition(&mut self, next: SessionState) {
        log::debug!("Session state {} -> {}", self.state, next);
        self.state = next;
    }

    async fn create_schema(&mut self) -> SessionResult<Identifier> {
        debug_assert_eq!(self.state, SessionState::Uninitialized);
        let schema = Identifier::generate(&self.schema_prefix);

        if let Err(source) = self.db.execute(&create_schema_sql(&schema)).await {
            return Err(SessionError::SchemaCreate { schema, source });
        }

        log::info!("created schema {}", schema);
        self.transition(SessionState::SchemaCreated);
        Ok(schema)
    }

    async fn run_tests(
        &mut self,
        schema: &Identifier,
        executor: &dyn TestExecutor,
    ) -> SessionOutcome {
        debug_assert_eq!(self.state, SessionState::SchemaCreated);
        let ctx = SessionContext::new(schema.clone(), Arc::clone(&self.db), self.proxy_addr);
        self.transition(SessionState::TestsRunning);

        let code = match AssertUnwindSafe(executor.run(&ctx)).catch_unwind().await {
            Ok(code) => code,
            Err(_) => {
                log::error!("Test executor panicked; treating the run as failed");
                PANIC_EXIT_CODE
            }
        };

        let outcome = SessionOutcome::from_exit_code(code);
        log::info!("Test run {}", outcome);
        outcome
    }

    async fn resolve(&mut self, schema: &Identifier, outcome: SessionOutcome) -> Resolution {
        debug_assert_eq!(self.state, SessionState::TestsRunning);

        let resolution = if !outcome.is_success() {
            Resolution::Retained(RetainReason::TestsFailed)
        } else if !self.drop_schema {
            Resolution::Retained(RetainReason::DropDisabled)
        } else {
            match self.db.execute(&drop_schema_sql(schema)).await {
                Ok(_) => Resolution::Dropped,
                Err(e) => {
                    log::error!(
                        "Failed to drop schema {}: {}. It must be removed manually.",
                        schema,
                        e
                    );
                    Resolution::Retained(RetainReason::DropFailed(e.to_string()))
                }
            }
        };

        match &resolution {
            Resolution::Dropped => log::info!("dropped schema {}", schema),
            Resolution::Retained(reason) => {
                log::warn!("retained schema {} ({})", schema, reason)
            }
        }

        let disposition: Disposition = resolution.disposition();
        self.transition(SessionState::Resolved(disposition));
        resolution
    }

    async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        if let Err(e) = self.db.close().await {
            log::warn!("Failed to close {} connection: {}", self.db.db_type(), e);
        }
        self.transition(SessionState::Closed);
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
