use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_run_args_parse() {
    let cli = Cli::try_parse_from([
        "tb",
        "run",
        "tests/sql",
        "--dsn",
        "duckdb://:memory:",
        "--drop-schema",
        "false",
        "--proxy-addr",
        "127.0.0.1:0",
        "--fail-fast",
    ])
    .unwrap();

    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.suite, PathBuf::from("tests/sql"));
    let overrides = args.overrides();
    assert_eq!(overrides.dsn.as_deref(), Some("duckdb://:memory:"));
    assert_eq!(overrides.drop_schema, Some(false));
    assert_eq!(overrides.proxy_addr.as_deref(), Some("127.0.0.1:0"));
    assert!(args.fail_fast);
}

#[test]
fn test_schema_name_default_prefix() {
    let cli = Cli::try_parse_from(["tb", "schema-name"]).unwrap();
    let Commands::SchemaName(args) = cli.command else {
        panic!("expected schema-name command");
    };
    assert_eq!(args.prefix, "test_");
}
