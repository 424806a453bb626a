//! Schema-name command

use anyhow::{Context, Result};
use tb_core::Identifier;
use tb_session::ExitStatus;

use crate::cli::SchemaNameArgs;

/// Print one generated identifier
pub(crate) fn execute(args: &SchemaNameArgs) -> Result<ExitStatus> {
    Identifier::validate_prefix(&args.prefix).context("Invalid --prefix")?;
    println!("{}", Identifier::generate(&args.prefix));
    Ok(ExitStatus::SUCCESS)
}
