// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use quill_core::ProfileUpdate;

use crate::context::AppContext;
use crate::display::format_user;
use crate::error::Result;
use crate::gateway::Transport;

pub async fn run<T: Transport + 'static>(
    ctx: &AppContext<T>,
    update: ProfileUpdate,
    out: &mut impl Write,
) -> Result<()> {
    let user = ctx.update_profile(update).await?;
    writeln!(out, "Profile updated\n{}", format_user(&user))?;
    Ok(())
}

/// Read an image file as a `data:` URL.
pub fn avatar_from_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!(
        "data:{};base64,{}",
        mime_type(path),
        STANDARD.encode(bytes)
    ))
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
