// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use quill_core::{PostId, PostUpdate};

use super::write_json;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::display::status_label;
use crate::error::Result;
use crate::gateway::Transport;

/// Map `--publish`/`--unpublish` to the update's `published` field.
pub fn published_flag(publish: bool, unpublish: bool) -> Option<bool> {
    match (publish, unpublish) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub async fn run<T: Transport + 'static>(
    ctx: &AppContext<T>,
    id: &str,
    update: PostUpdate,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let updated = ctx.posts().update(&PostId::new(id), update).await?;
    match format {
        OutputFormat::Text => writeln!(
            out,
            "Updated {} ({}): {}",
            updated.id,
            status_label(&updated),
            updated.title
        )?,
        OutputFormat::Json => write_json(out, &updated)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
