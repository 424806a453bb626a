//! Session configuration and parsing for testbed.yml

use crate::dsn::{Dsn, PLACEHOLDER_DSN};
use crate::error::{CoreError, CoreResult};
use crate::identifier::{Identifier, TEST_SCHEMA_PREFIX};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Default bind address of the forwarding proxy.
pub const DEFAULT_PROXY_ADDR: &str = "127.0.0.1:1080";

/// Configuration file names searched by [`ConfigFile::load_from_dir`].
pub const CONFIG_FILE_NAMES: [&str; 2] = ["testbed.yml", "testbed.yaml"];

/// Optional on-disk configuration (testbed.yml)
///
/// Every field may be omitted; omitted fields fall back to the built-in
/// defaults, and CLI flags or environment variables take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Database connection string
    #[serde(default)]
    pub dsn: Option<String>,

    /// Drop the test schema after a fully successful run
    #[serde(default = "default_true")]
    pub drop_schema: bool,

    /// Bind address of the forwarding proxy
    #[serde(default)]
    pub proxy_addr: Option<String>,

    /// Prefix for generated schema names
    #[serde(default)]
    pub schema_prefix: Option<String>,
}

impl ConfigFile {
    /// Load a configuration file from an explicit path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: ConfigFile = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Look for testbed.yml or testbed.yaml in `dir`.
    ///
    /// Returns `Ok(None)` when neither file exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Option<Self>> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                return Self::load(&path).map(Some);
            }
        }
        Ok(None)
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dsn: Option<String>,
    pub drop_schema: Option<bool>,
    pub proxy_addr: Option<String>,
    pub schema_prefix: Option<String>,
}

/// Resolved, immutable session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Where the suite's database lives
    pub dsn: Dsn,

    /// Drop the test schema when every test passed
    pub drop_schema: bool,

    /// Bind address of the forwarding proxy
    pub proxy_addr: SocketAddr,

    /// Prefix of the generated schema name
    pub schema_prefix: String,
}

impl SessionConfig {
    /// Build a configuration with default settings for `dsn`.
    pub fn new(dsn: Dsn) -> Self {
        Self {
            dsn,
            drop_schema: true,
            proxy_addr: SocketAddr::from(([127, 0, 0, 1], 1080)),
            schema_prefix: TEST_SCHEMA_PREFIX.to_string(),
        }
    }

    /// Set whether the schema is dropped after a passing run
    pub fn with_drop_schema(mut self, drop_schema: bool) -> Self {
        self.drop_schema = drop_schema;
        self
    }

    /// Set the proxy bind address
    pub fn with_proxy_addr(mut self, addr: SocketAddr) -> Self {
        self.proxy_addr = addr;
        self
    }

    /// Resolve defaults, then the config file, then overrides.
    pub fn resolve(file: Option<&ConfigFile>, overrides: &ConfigOverrides) -> CoreResult<Self> {
        let dsn = overrides
            .dsn
            .as_deref()
            .or_else(|| file.and_then(|f| f.dsn.as_deref()))
            .unwrap_or(PLACEHOLDER_DSN);
        let dsn = Dsn::parse(dsn)?;

        let drop_schema = overrides
            .drop_schema
            .or_else(|| file.map(|f| f.drop_schema))
            .unwrap_or(true);

        let proxy_addr = overrides
            .proxy_addr
            .as_deref()
            .or_else(|| file.and_then(|f| f.proxy_addr.as_deref()))
            .unwrap_or(DEFAULT_PROXY_ADDR);
        let proxy_addr: SocketAddr = proxy_addr.parse().map_err(|e| CoreError::ConfigInvalid {
            message: format!("proxy address '{}': {}", proxy_addr, e),
        })?;

        let schema_prefix = overrides
            .schema_prefix
            .clone()
            .or_else(|| file.and_then(|f| f.schema_prefix.clone()))
            .unwrap_or_else(|| TEST_SCHEMA_PREFIX.to_string());
        Identifier::validate_prefix(&schema_prefix)?;

        let config = Self {
            dsn,
            drop_schema,
            proxy_addr,
            schema_prefix,
        };
        log::debug!(
            "Resolved session config: dsn={} drop_schema={} proxy_addr={} schema_prefix={}",
            config.dsn,
            config.drop_schema,
            config.proxy_addr,
            config.schema_prefix
        );
        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
