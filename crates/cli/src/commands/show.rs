// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use quill_core::PostId;

use super::write_json;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::display::format_post_details;
use crate::error::Result;
use crate::gateway::Transport;

pub async fn run<T: Transport + 'static>(
    ctx: &AppContext<T>,
    id: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let post = ctx.posts().get(&PostId::new(id)).await?;
    match format {
        OutputFormat::Text => writeln!(out, "{}", format_post_details(&post))?,
        OutputFormat::Json => write_json(out, post.as_ref())?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
