//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("metroctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Subway line management backend"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("metroctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("metroctl").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PostgreSQL connection string"));
}

#[test]
fn test_serve_requires_database_url() {
    let mut cmd = Command::cargo_bin("metroctl").unwrap();
    cmd.arg("serve").env_remove("DATABASE_URL");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}
