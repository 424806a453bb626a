//! End-to-end tests for the `tb` binary

use std::fs;
use std::path::Path;
use std::process::Command;

/// Path to the compiled tb binary
fn tb_bin() -> String {
    env!("CARGO_BIN_EXE_tb").to_string()
}

/// Run `tb` in `cwd` with a clean environment; returns (stdout, stderr, exit code).
fn run_tb(cwd: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(tb_bin())
        .current_dir(cwd)
        .args(args)
        .env_remove("TESTBED_DSN")
        .env_remove("TESTBED_DROP_SCHEMA")
        .env_remove("TESTBED_PROXY_ADDR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute tb with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn write_suite(dir: &Path, check: &str) {
    let suite = dir.join("suite");
    fs::create_dir_all(&suite).unwrap();
    fs::write(
        suite.join("setup.sql"),
        "CREATE TABLE {{ schema }}.users (id INT, email VARCHAR);
         INSERT INTO {{ schema }}.users VALUES (1, 'a@example.com'), (2, 'b@example.com');",
    )
    .unwrap();
    fs::write(suite.join("email_present.sql"), check).unwrap();
}

#[test]
fn test_schema_name_prints_prefixed_identifier() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_tb(dir.path(), &["schema-name"]);

    assert_eq!(code, 0);
    let name = stdout.trim();
    assert!(name.starts_with("test_"), "got {}", name);
    assert_eq!(name.len(), "test_".len() + 32);
}

#[test]
fn test_schema_name_rejects_bad_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_tb(dir.path(), &["schema-name", "--prefix", "bad-prefix"]);

    assert_ne!(code, 0);
    assert!(stderr.contains("C004"), "stderr: {}", stderr);
}

#[test]
fn test_run_passing_suite_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_suite(
        dir.path(),
        "SELECT * FROM {{ schema }}.users WHERE email IS NULL",
    );

    let (stdout, stderr, code) = run_tb(
        dir.path(),
        &[
            "run",
            "suite",
            "--dsn",
            "duckdb://:memory:",
            "--proxy-addr",
            "127.0.0.1:0",
        ],
    );

    assert_eq!(code, 0, "stdout: {}\nstderr: {}", stdout, stderr);
    assert!(stdout.contains("✓ email_present"), "stdout: {}", stdout);
    assert!(stdout.contains("Passed: 1, Failed: 0"));
}

#[test]
fn test_run_failing_suite_passes_exit_code_through() {
    let dir = tempfile::tempdir().unwrap();
    write_suite(
        dir.path(),
        "SELECT * FROM {{ schema }}.users WHERE email IS NOT NULL",
    );

    let (stdout, _, code) = run_tb(
        dir.path(),
        &[
            "run",
            "suite",
            "--dsn",
            "duckdb://:memory:",
            "--proxy-addr",
            "127.0.0.1:0",
        ],
    );

    assert_eq!(code, 1);
    assert!(stdout.contains("✗ email_present (2 failures)"), "stdout: {}", stdout);
}

#[test]
fn test_run_without_dsn_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    write_suite(dir.path(), "SELECT 1 WHERE false");

    let (_, stderr, code) = run_tb(dir.path(), &["run", "suite", "--proxy-addr", "127.0.0.1:0"]);

    assert_eq!(code, 2);
    assert!(stderr.contains("C003"), "stderr: {}", stderr);
}

#[test]
fn test_run_reads_config_file_from_working_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_suite(
        dir.path(),
        "SELECT * FROM {{ schema }}.users WHERE email IS NULL",
    );
    fs::write(
        dir.path().join("testbed.yml"),
        "dsn: \"duckdb://:memory:\"\nproxy_addr: \"127.0.0.1:0\"\nschema_prefix: \"ci_\"\n",
    )
    .unwrap();

    let (stdout, stderr, code) = run_tb(dir.path(), &["run", "suite"]);

    assert_eq!(code, 0, "stdout: {}\nstderr: {}", stdout, stderr);
    assert!(stdout.contains("in schema ci_"), "stdout: {}", stdout);
}

#[test]
fn test_run_missing_suite_is_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_tb(
        dir.path(),
        &["run", "nope", "--dsn", "duckdb://:memory:", "--proxy-addr", "127.0.0.1:0"],
    );

    assert_eq!(code, 2);
    assert!(stderr.contains("T001"), "stderr: {}", stderr);
}

#[test]
fn test_schema_name_empty_prefix_starts_with_letter() {
    let dir = tempfile::tempdir().unwrap();
    for _ in 0..20 {
        let (stdout, _, code) = run_tb(dir.path(), &["schema-name", "--prefix", ""]);
        assert_eq!(code, 0);
        let name = stdout.trim();
        assert_eq!(name.len(), 32);
        assert!(name.starts_with(|c: char| c.is_ascii_lowercase()), "got {}", name);
    }
}

#[test]
fn test_run_drop_failure_keeps_exit_zero_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let suite = dir.path().join("suite");
    fs::create_dir_all(&suite).unwrap();
    // The schema is gone before the session tries to drop it
    fs::write(suite.join("setup.sql"), "DROP SCHEMA {{ schema }};").unwrap();
    fs::write(suite.join("nothing_selected.sql"), "SELECT 1 WHERE false").unwrap();

    let (stdout, stderr, code) = run_tb(
        dir.path(),
        &[
            "run",
            "suite",
            "--dsn",
            "duckdb://:memory:",
            "--proxy-addr",
            "127.0.0.1:0",
        ],
    );

    assert_eq!(code, 0, "stdout: {}\nstderr: {}", stdout, stderr);
    assert!(stdout.contains("Passed: 1, Failed: 0"), "stdout: {}", stdout);
    assert!(stderr.contains("Failed to drop schema"), "stderr: {}", stderr);
}
