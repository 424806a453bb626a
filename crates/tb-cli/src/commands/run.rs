//! Run command: one session around one SQL suite

use anyhow::Result;
use std::path::Path;
use tb_core::{ConfigFile, CoreResult, SessionConfig};
use tb_session::{run_session, ExitStatus, SessionError};
use tb_test::{SqlSuite, SqlSuiteExecutor};

use crate::cli::{GlobalArgs, RunArgs};

/// Execute the run command
pub(crate) async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<ExitStatus> {
    let config = match load_config(args, global) {
        Ok(config) => config,
        Err(e) => {
            let error = SessionError::Config(e);
            log::error!("{}", error);
            return Ok(ExitStatus::from_error(&error));
        }
    };

    let suite = match SqlSuite::discover(&args.suite) {
        Ok(suite) => suite,
        Err(e) => {
            log::error!("{}", e);
            return Ok(ExitStatus::CONFIG_ERROR);
        }
    };

    let executor = SqlSuiteExecutor::new(suite).with_fail_fast(args.fail_fast);
    Ok(run_session(&config, &executor).await)
}

/// Defaults, then testbed.yml, then flags and environment
fn load_config(args: &RunArgs, global: &GlobalArgs) -> CoreResult<SessionConfig> {
    let file = match &global.config {
        Some(path) => Some(ConfigFile::load(path)?),
        None => ConfigFile::load_from_dir(Path::new("."))?,
    };
    SessionConfig::resolve(file.as_ref(), &args.overrides())
}
