//! Process exit status for a finished session

use crate::controller::SessionReport;
use crate::error::SessionError;
use std::fmt;

/// Exit status of the bootstrapper process.
///
/// Test failures pass the executor's code through when it fits in a process
/// exit status (`1..=255`); any other non-zero code becomes `1`, because the
/// OS keeps only the low byte. Fatal setup
/// errors use fixed codes so CI can tell them apart from failing tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(i32);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    pub const CONFIG_ERROR: ExitStatus = ExitStatus(2);
    pub const PROXY_ERROR: ExitStatus = ExitStatus(3);
    pub const CONNECTION_ERROR: ExitStatus = ExitStatus(4);
    pub const SCHEMA_ERROR: ExitStatus = ExitStatus(5);
    pub const TEST_FAILURE: ExitStatus = ExitStatus(1);

    /// Status for a session that ran its tests.
    ///
    /// A failed drop after a passing run does not change the status; it is
    /// reported through the log instead.
    pub fn from_report(report: &SessionReport) -> Self {
        if let Some(error) = report.resolution.drop_error() {
            log::warn!(
                "Tests passed but schema {} could not be dropped: {}",
                report.schema,
                error
            );
        }
        Self::from_test_code(report.outcome.exit_code())
    }

    /// Status for a raw executor exit code
    pub fn from_test_code(code: i32) -> Self {
        match code {
            0..=255 => Self(code),
            _ => Self::TEST_FAILURE,
        }
    }

    /// Status for a session aborted by a fatal error
    pub fn from_error(error: &SessionError) -> Self {
        match error {
            SessionError::Config(_) => Self::CONFIG_ERROR,
            SessionError::ProxyBind(_) => Self::PROXY_ERROR,
            SessionError::Connection(_) => Self::CONNECTION_ERROR,
            SessionError::SchemaCreate { .. } => Self::SCHEMA_ERROR,
        }
    }

    /// Numeric exit code
    pub fn code(&self) -> i32 {
        self.0
    }

    /// True for a zero status
    pub fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Terminate the process with this status
    pub fn exit(self) -> ! {
        std::process::exit(self.0)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
