//! Session states, outcomes and resolutions

use std::fmt;

/// Lifecycle state of a [`SessionController`](crate::SessionController)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    /// No schema yet
    Uninitialized,
    /// Schema exists, tests not started
    SchemaCreated,
    /// Executor has control
    TestsRunning,
    /// Drop decision taken
    Resolved(Disposition),
    /// Connection released
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::SchemaCreated => write!(f, "schema_created"),
            SessionState::TestsRunning => write!(f, "tests_running"),
            SessionState::Resolved(d) => write!(f, "resolved({})", d),
            SessionState::Closed => write!(f, "closed"),
        }
    }
}

/// What happened to the test schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Dropped,
    Retained,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Dropped => write!(f, "dropped"),
            Disposition::Retained => write!(f, "retained"),
        }
    }
}

/// Why a schema was left in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetainReason {
    /// At least one test failed; kept for inspection
    TestsFailed,
    /// Dropping is disabled by configuration
    DropDisabled,
    /// Every test passed but the drop statement failed
    DropFailed(String),
}

impl fmt::Display for RetainReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetainReason::TestsFailed => write!(f, "tests failed"),
            RetainReason::DropDisabled => write!(f, "drop disabled"),
            RetainReason::DropFailed(e) => write!(f, "drop failed: {}", e),
        }
    }
}

/// Result of the drop decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Dropped,
    Retained(RetainReason),
}

impl Resolution {
    /// Dropped or retained, without the reason
    pub fn disposition(&self) -> Disposition {
        match self {
            Resolution::Dropped => Disposition::Dropped,
            Resolution::Retained(_) => Disposition::Retained,
        }
    }

    /// The drop error, if a drop was attempted and failed
    pub fn drop_error(&self) -> Option<&str> {
        match self {
            Resolution::Retained(RetainReason::DropFailed(e)) => Some(e),
            _ => None,
        }
    }
}

/// Aggregate pass/fail of the whole test run, as an exit code.
///
/// `0` means every test passed; any other value means at least one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome(i32);

impl SessionOutcome {
    /// Every test passed
    pub const SUCCESS: SessionOutcome = SessionOutcome(0);

    /// Wrap an executor exit code
    pub fn from_exit_code(code: i32) -> Self {
        Self(code)
    }

    /// True when the exit code is zero
    pub fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// The executor's exit code, unchanged
    pub fn exit_code(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            write!(f, "passed")
        } else {
            write!(f, "failed (exit code {})", self.0)
        }
    }
}
