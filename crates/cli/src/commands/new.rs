// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use quill_core::NewPost;

use super::write_json;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::display::status_label;
use crate::error::Result;
use crate::gateway::Transport;

pub async fn run<T: Transport + 'static>(
    ctx: &AppContext<T>,
    post: NewPost,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let created = ctx.posts().create(post).await?;
    match format {
        OutputFormat::Text => writeln!(
            out,
            "Created {} ({}): {}",
            created.id,
            status_label(&created),
            created.title
        )?,
        OutputFormat::Json => write_json(out, &created)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
