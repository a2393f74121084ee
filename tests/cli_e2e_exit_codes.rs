//! End-to-end tests for CLI exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: Any error from loading, validation, submission or polling
//! - Exit code 2: Invalid command-line usage (handled by clap)

#[allow(dead_code)]
mod common;
use common::prelude::*;

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("spin");

    cmd.arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("application"))
        .stdout(predicate::str::contains("project"));
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("spin");

    cmd.arg("--version").assert().code(0);
}

/// Exit code 2 is returned for an unknown subcommand.
#[test]
fn test_exit_code_unknown_subcommand() {
    let mut cmd = cargo_bin_cmd!("spin");

    cmd.arg("pipeline").assert().code(2);
}

/// Exit code 2 is returned for an unknown output format.
#[test]
fn test_exit_code_invalid_output_format() {
    let fixture = TestFixture::new();

    fixture
        .bare_command()
        .args(["application", "save", "--output", "xml"])
        .assert()
        .code(2);
}

/// Exit code 1 is returned when no Gate endpoint is configured.
#[test]
fn test_exit_code_missing_endpoint() {
    let fixture = TestFixture::new();

    fixture
        .bare_command()
        .args([
            "application",
            "save",
            "--application-name",
            "billing",
            "--owner-email",
            "owner@example.com",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no Gate endpoint configured"));
}

/// Exit code 1 is returned when the Gate endpoint is unreachable.
#[test]
fn test_exit_code_unreachable_gate() {
    let fixture = TestFixture::new();

    fixture
        .bare_command()
        .args([
            "application",
            "save",
            "--gate-endpoint",
            "http://127.0.0.1:1",
            "--application-name",
            "billing",
            "--owner-email",
            "owner@example.com",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Transport error during task submission"));
}

/// Exit code 1 is returned for a config file that does not exist.
#[test]
fn test_exit_code_missing_config_file() {
    let fixture = TestFixture::new();

    fixture
        .bare_command()
        .env("SPIN_CONFIG", fixture.path().join("nonexistent"))
        .args([
            "project",
            "save",
            "--project-name",
            "platform",
            "--owner-email",
            "owner@example.com",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not load config"));
}
