//! Data source name parsing.
//!
//! A DSN has the shape `scheme://target`. The only supported scheme is
//! `duckdb`, whose target is either `:memory:` or a database file path:
//!
//! ```text
//! duckdb://:memory:
//! duckdb:///var/tmp/suite.duckdb
//! duckdb://relative/suite.duckdb
//! ```

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default DSN value. It never parses, so a session started without an
/// explicit DSN fails before touching any database.
pub const PLACEHOLDER_DSN: &str = "unset://";

/// Scheme for the embedded DuckDB driver.
pub const DUCKDB_SCHEME: &str = "duckdb";

const MEMORY_TARGET: &str = ":memory:";

/// Where a DSN points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DsnTarget {
    /// In-memory database, discarded when the connection closes
    Memory,
    /// Database file on disk
    Path(PathBuf),
}

/// A parsed data source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    raw: String,
    scheme: String,
    target: DsnTarget,
}

impl Dsn {
    /// Parse a DSN string.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidDsn {
            dsn: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.trim().is_empty() || raw == PLACEHOLDER_DSN {
            return Err(invalid(
                "no DSN configured (pass --dsn or set TESTBED_DSN)",
            ));
        }

        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| invalid("expected '<scheme>://<target>'"))?;

        if scheme != DUCKDB_SCHEME {
            return Err(invalid(&format!(
                "unsupported scheme '{}' (supported: {})",
                scheme, DUCKDB_SCHEME
            )));
        }

        let target = match rest {
            "" => return Err(invalid("missing database target")),
            MEMORY_TARGET => DsnTarget::Memory,
            path => DsnTarget::Path(PathBuf::from(path)),
        };

        Ok(Self {
            raw: raw.to_string(),
            scheme: scheme.to_string(),
            target,
        })
    }

    /// The DSN scheme (driver name)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The database target
    pub fn target(&self) -> &DsnTarget {
        &self.target
    }

    /// The DSN exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Dsn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[path = "dsn_test.rs"]
mod tests;
