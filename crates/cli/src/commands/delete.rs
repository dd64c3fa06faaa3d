// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use quill_core::PostId;

use crate::context::AppContext;
use crate::error::Result;
use crate::gateway::Transport;

pub async fn run<T: Transport + 'static>(
    ctx: &AppContext<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    ctx.posts().delete(&PostId::new(id)).await?;
    writeln!(out, "Deleted {id}")?;
    Ok(())
}

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;
