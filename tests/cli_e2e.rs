//! End-to-end CLI tests for the cycling-fetch binary.
//!
//! Only argument handling is exercised here; anything past parsing needs a
//! browser.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("cycling-fetch").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discover and download numbered CSV files"))
        .stdout(predicate::str::contains("--max-sequence"))
        .stdout(predicate::str::contains("--dry-run"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("cycling-fetch").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cycling-fetch"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("cycling-fetch").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_json_without_dry_run_rejected() {
    let mut cmd = Command::cargo_bin("cycling-fetch").unwrap();
    cmd.arg("--json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dry-run"));
}

#[test]
fn test_binary_non_http_url_rejected() {
    let mut cmd = Command::cargo_bin("cycling-fetch").unwrap();
    cmd.args(["--url", "ftp://cycling.example.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn test_binary_zero_timeout_rejected() {
    let mut cmd = Command::cargo_bin("cycling-fetch").unwrap();
    cmd.args(["--timeout-secs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout-secs"));
}
