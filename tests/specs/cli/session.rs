// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session persistence across invocations, without a backend.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Nothing listens on the discard port, so any request fails fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

const USER_JSON: &str = r#"{"username":"alice","description":"","createdAt":"2026-01-02T03:04:05Z","updatedAt":"2026-01-02T03:04:05Z"}"#;

fn quill(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("quill");
    cmd.env("QUILL_STATE_DIR", temp.path().join("state"))
        .env("QUILL_CONFIG_DIR", temp.path().join("config"))
        .env("QUILL_API_URL", UNREACHABLE_API)
        .env("NO_COLOR", "1")
        .env_remove("QUILL_LOG");
    cmd
}

fn write_session(temp: &TempDir, token: &str, user_json: &str) {
    let dir = temp.path().join("state");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("auth_token"), token).unwrap();
    std::fs::write(dir.join("auth_user.json"), user_json).unwrap();
}

#[test]
fn whoami_when_logged_out_fails() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: not logged in"))
        .stderr(predicate::str::contains("quill login"));
}

#[test]
fn logout_is_idempotent() {
    let temp = TempDir::new().unwrap();
    for _ in 0..2 {
        quill(&temp)
            .arg("logout")
            .assert()
            .success()
            .stdout("Not logged in\n");
    }
}

#[test]
fn persisted_session_is_restored() {
    let temp = TempDir::new().unwrap();
    write_session(&temp, "tok", USER_JSON);

    quill(&temp)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("alice\n"));

    quill(&temp)
        .args(["whoami", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"alice\""));
}

#[test]
fn logout_removes_persisted_session() {
    let temp = TempDir::new().unwrap();
    write_session(&temp, "tok", USER_JSON);

    quill(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout("Logged out alice\n");

    assert!(!temp.path().join("state/auth_token").exists());
    assert!(!temp.path().join("state/auth_user.json").exists());
    quill(&temp).arg("whoami").assert().failure();
}

#[test]
fn corrupt_session_is_discarded() {
    let temp = TempDir::new().unwrap();
    write_session(&temp, "tok", "{not json");

    quill(&temp)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));

    assert!(!temp.path().join("state/auth_token").exists());
}

#[test]
fn register_rejects_short_username_before_sending() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .args(["register", "al", "--password", "secret1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Username must be at least 3 characters long",
        ));
}

#[test]
fn login_reads_password_from_stdin() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .args(["login", "alice"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Password cannot be empty"));
}

#[test]
fn login_against_unreachable_backend() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .args(["login", "alice", "--password", "secret1"])
        .assert()
        .failure()
        .stderr("error: Network error. Please try again.\n");

    assert!(!temp.path().join("state/auth_token").exists());
}
