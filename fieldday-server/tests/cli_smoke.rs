//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("fieldday").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("School sports sign-up server"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("fieldday").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Secret for signing notice cookies"));
}

#[test]
fn test_serve_requires_secret() {
    let mut cmd = Command::cargo_bin("fieldday").unwrap();
    cmd.arg("serve").env_remove("FIELDDAY_SECRET");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--secret"));
}

#[test]
fn test_serve_rejects_short_secret() {
    let mut cmd = Command::cargo_bin("fieldday").unwrap();
    cmd.arg("serve").arg("--secret").arg("too-short");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("at least 32 bytes"));
}

#[test]
fn test_init_db_creates_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fieldday.db");

    let mut cmd = Command::cargo_bin("fieldday").unwrap();
    cmd.arg("init-db").arg("--db-path").arg(&db_path);

    cmd.assert().success();
    assert!(db_path.exists());
}
