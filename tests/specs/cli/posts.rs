// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Post commands that fail before or at the network boundary.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

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

fn logged_in() -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("state");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("auth_token"), "tok").unwrap();
    std::fs::write(dir.join("auth_user.json"), USER_JSON).unwrap();
    temp
}

#[test]
fn list_against_unreachable_backend() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr("error: Network error. Please try again.\n");
}

#[test]
fn mine_requires_login() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .arg("mine")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn new_with_empty_title_fails_validation() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .args(["new", "", "-c", "body"])
        .assert()
        .failure()
        .stderr("error: Title cannot be empty\n");
}

#[test]
fn new_requires_login() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .args(["new", "Hello", "-c", "body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn new_reads_content_from_stdin() {
    let temp = logged_in();
    // content passes validation, so the failure is the network
    quill(&temp)
        .args(["new", "Hello", "-f", "-"])
        .write_stdin("Body from stdin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Network error"));
}

#[test]
fn edit_without_changes_fails() {
    let temp = logged_in();
    quill(&temp)
        .args(["edit", "p1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn edit_publish_and_unpublish_conflict() {
    let temp = logged_in();
    quill(&temp)
        .args(["edit", "p1", "--publish", "--unpublish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn invalid_api_url_is_config_error() {
    let temp = TempDir::new().unwrap();
    quill(&temp)
        .args(["--api-url", "not a url", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}

#[test]
fn broken_config_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "api_url = [").unwrap();

    quill(&temp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}
