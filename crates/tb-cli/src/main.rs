//! Testbed CLI - run SQL test suites inside a disposable schema

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;

use cli::Cli;
use commands::{run, schema_name};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let status = match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global).await?,
        cli::Commands::SchemaName(args) => schema_name::execute(args)?,
    };
    status.exit()
}
