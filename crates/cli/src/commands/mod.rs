// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod account;
pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod profile;
pub mod show;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::cli::{PasswordArgs, PostContentArgs};
use crate::error::Result;

/// Resolve `--content`/`--file` into the post body, if either was given.
pub fn read_content(args: &PostContentArgs) -> Result<Option<String>> {
    match (&args.content, &args.file) {
        (Some(content), _) => Ok(Some(content.clone())),
        (None, Some(path)) => read_source(path).map(Some),
        (None, None) => Ok(None),
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// The password from `--password`, or the first line of stdin.
pub fn read_password(args: PasswordArgs) -> Result<String> {
    if let Some(password) = args.password {
        return Ok(password);
    }
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn write_json<V: Serialize + ?Sized>(out: &mut impl Write, value: &V) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}")?;
    Ok(())
}
