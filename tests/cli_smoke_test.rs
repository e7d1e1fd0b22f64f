//! CLI smoke tests
//!
//! These run the compiled binary and only assert on argument handling, so
//! they need no backend or keyring.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("boardctl").expect("binary exists");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("boards"));
}

#[test]
fn test_version_prints() {
    let mut cmd = Command::cargo_bin("boardctl").expect("binary exists");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("boardctl"));
}

#[test]
fn test_boards_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("boardctl").expect("binary exists");
    cmd.args(["boards", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("categories"));
}

#[test]
fn test_missing_command_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("boardctl").expect("binary exists");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_command_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("boardctl").expect("binary exists");
    cmd.arg("frobnicate").assert().failure();
}

#[test]
fn test_login_requires_username() {
    let mut cmd = Command::cargo_bin("boardctl").expect("binary exists");
    cmd.arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--username"));
}
