// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use quill_core::Credentials;

use super::write_json;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::display::format_user;
use crate::error::Result;
use crate::gateway::{ApiError, Transport};

pub async fn login<T: Transport + 'static>(
    ctx: &AppContext<T>,
    credentials: &Credentials,
    out: &mut impl Write,
) -> Result<()> {
    let user = ctx.sign_in(credentials).await?;
    writeln!(out, "Logged in as {}", user.username)?;
    Ok(())
}

pub async fn register<T: Transport + 'static>(
    ctx: &AppContext<T>,
    credentials: &Credentials,
    out: &mut impl Write,
) -> Result<()> {
    let user = ctx.sign_up(credentials).await?;
    writeln!(out, "Registered and logged in as {}", user.username)?;
    Ok(())
}

/// Logging out twice is not an error.
pub fn logout<T: Transport + 'static>(ctx: &AppContext<T>, out: &mut impl Write) -> Result<()> {
    match ctx.sign_out() {
        Some(username) => writeln!(out, "Logged out {username}")?,
        None => writeln!(out, "Not logged in")?,
    }
    Ok(())
}

pub fn whoami<T: Transport + 'static>(
    ctx: &AppContext<T>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let user = ctx.session().user().ok_or(ApiError::Unauthenticated)?;
    match format {
        OutputFormat::Text => writeln!(out, "{}", format_user(&user))?,
        OutputFormat::Json => write_json(out, &user)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
