// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Post list commands: the public feed, one author, and your own posts.

use std::io::Write;

use quill_core::PostList;

use super::write_json;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::display::format_post_list;
use crate::error::Result;
use crate::gateway::Transport;

pub async fn feed<T: Transport + 'static>(
    ctx: &AppContext<T>,
    page: u32,
    limit: u32,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let list = ctx.posts().list(page, limit).await?;
    output(&list, false, format, out)
}

pub async fn by_user<T: Transport + 'static>(
    ctx: &AppContext<T>,
    username: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let list = ctx.posts().list_by_user(username).await?;
    output(&list, false, format, out)
}

/// Drafts are listed too, so every post carries a status badge.
pub async fn mine<T: Transport + 'static>(
    ctx: &AppContext<T>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let list = ctx.posts().list_mine().await?;
    output(&list, true, format, out)
}

fn output(
    list: &PostList,
    with_status: bool,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", format_post_list(list, with_status))?,
        OutputFormat::Json => write_json(out, list)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
