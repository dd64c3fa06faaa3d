// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `QUILL_API_URL` if set.
pub fn api_url() -> Option<String> {
    non_empty(vars::QUILL_API_URL)
}

/// Returns the value of `QUILL_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    non_empty(vars::QUILL_STATE_DIR).map(PathBuf::from)
}

/// Returns the value of `QUILL_CONFIG_DIR` if set.
pub fn config_dir() -> Option<PathBuf> {
    non_empty(vars::QUILL_CONFIG_DIR).map(PathBuf::from)
}

/// Log filter directives from `QUILL_LOG`, e.g. `debug` or `quillrs::sync=debug`.
pub fn log_filter() -> Option<String> {
    non_empty(vars::QUILL_LOG)
}

/// Returns `true` if `NO_COLOR=1`.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `COLOR=1`.
pub fn force_color() -> bool {
    std::env::var(vars::COLOR).is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
