//! CLI integration tests
//!
//! These exercise argument handling and the failure paths that settle
//! before any network call is made.
use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("roastline").unwrap();
    cmd.env_remove("GEMINI_API_KEY");
    cmd
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("landing-page copy"));
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success();
}

#[test]
fn test_cli_requires_url() {
    cmd().assert().failure();
}

#[test]
fn test_cli_rejects_unknown_format() {
    cmd()
        .args(["-f", "docx", "https://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_pdf_requires_output() {
    cmd()
        .args(["-f", "pdf", "https://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn test_cli_missing_api_key() {
    cmd()
        .arg("https://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_cli_missing_api_key_with_bare_domain() {
    // Scheme normalization happens before credential lookup either way.
    cmd()
        .arg("example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}
