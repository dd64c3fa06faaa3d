// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn quill() -> Command {
    cargo_bin_cmd!("quill")
}

#[yare::parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
)]
fn completion_generates_non_empty_output(shell: &str) {
    let output = quill().args(["completion", shell]).output().unwrap();

    assert!(output.status.success());
    assert!(!output.stdout.is_empty(), "completion output should not be empty");
}

#[test]
fn completion_bash_mentions_commands() {
    quill()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quill"))
        .stdout(predicate::str::contains("whoami"));
}

#[test]
fn completion_needs_no_config() {
    // a broken config must not stop completion generation
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "api_url = [").unwrap();
    quill()
        .env("QUILL_CONFIG_DIR", temp.path())
        .args(["completion", "zsh"])
        .assert()
        .success();
}

#[test]
fn completion_without_shell_fails() {
    quill().arg("completion").assert().failure();
}

#[test]
fn completion_invalid_shell_fails() {
    quill()
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
