//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn pricecheck() -> Command {
    let mut cmd = Command::cargo_bin("pricecheck").unwrap();
    cmd.env_remove("DATABASE_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_serve_help() {
    pricecheck()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database URL"))
        .stdout(predicate::str::contains("--no-seed"));
}

#[test]
fn test_completions_bash() {
    pricecheck()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("pricecheck"));
}

#[test]
fn test_rejects_unknown_database_scheme() {
    pricecheck()
        .arg("init-db")
        .arg("--database-url")
        .arg("mysql://localhost/prices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid DATABASE_URL"));
}

#[test]
fn test_init_db_seeds_new_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("products.db");
    let url = format!("sqlite://{}", db.display());

    pricecheck()
        .arg("init-db")
        .arg("--database-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicate::str::contains("20 sample products inserted"));
    assert!(db.exists());

    pricecheck()
        .arg("init-db")
        .arg("--database-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    pricecheck()
        .arg("init-db")
        .arg("--force")
        .arg("--database-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicate::str::contains("already populated"));
}

#[test]
fn test_init_db_reads_database_url_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("env.db");

    pricecheck()
        .env("DATABASE_URL", format!("sqlite://{}", db.display()))
        .arg("init-db")
        .assert()
        .success();
    assert!(db.exists());
}
