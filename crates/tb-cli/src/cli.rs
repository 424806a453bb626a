//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tb_core::config::ConfigOverrides;

/// Testbed - run database test suites inside a disposable schema
#[derive(Parser, Debug)]
#[command(name = "tb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: testbed.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a test schema, run a SQL suite in it, and drop it if all tests pass
    Run(RunArgs),

    /// Print a freshly generated schema name
    SchemaName(SchemaNameArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory of .sql tests (setup.sql at its root runs first)
    pub suite: PathBuf,

    /// Database DSN, e.g. duckdb://target/suite.duckdb
    #[arg(long, env = "TESTBED_DSN")]
    pub dsn: Option<String>,

    /// Drop the test schema after a fully successful run
    #[arg(long, env = "TESTBED_DROP_SCHEMA", value_name = "BOOL")]
    pub drop_schema: Option<bool>,

    /// Bind address of the SOCKS5 proxy
    #[arg(long, env = "TESTBED_PROXY_ADDR", value_name = "ADDR")]
    pub proxy_addr: Option<String>,

    /// Prefix for the generated schema name
    #[arg(long, value_name = "PREFIX")]
    pub schema_prefix: Option<String>,

    /// Stop on first failure
    #[arg(long)]
    pub fail_fast: bool,
}

impl RunArgs {
    /// Flag and environment values, ready to layer over the config file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            dsn: self.dsn.clone(),
            drop_schema: self.drop_schema,
            proxy_addr: self.proxy_addr.clone(),
            schema_prefix: self.schema_prefix.clone(),
        }
    }
}

/// Arguments for the schema-name command
#[derive(Args, Debug)]
pub struct SchemaNameArgs {
    /// Prefix for the generated name
    #[arg(long, default_value = "test_")]
    pub prefix: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
