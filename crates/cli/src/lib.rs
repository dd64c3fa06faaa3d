// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! quillrs - client library behind the `quill` blogging CLI.
//!
//! # Main Components
//!
//! - [`SessionStore`] - Who is logged in, persisted across runs
//! - [`Gateway`] - Typed calls against the blog's HTTP API
//! - [`PostSync`] - Cached, deduplicated post queries and confirmed writes
//! - [`AppContext`] - The three wired together from a [`Config`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use quillrs::{AppContext, Config};
//!
//! let ctx = AppContext::from_config(Config::load_default()?)?;
//! let feed = ctx.posts().list(1, 10).await?;
//! let again = ctx.posts().list(1, 10).await?; // served from cache
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod help;

pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod gateway;
pub mod session;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat, PasswordArgs, PostContentArgs};
pub use config::Config;
pub use context::AppContext;
pub use error::{Error, Result};
pub use gateway::{ApiError, Gateway};
pub use session::SessionStore;
pub use sync::PostSync;

use std::io::Write;

use clap::CommandFactory;
use clap_complete::generate;
use quill_core::{Credentials, NewPost, PostUpdate, ProfileUpdate};

use crate::gateway::Transport;

/// Execute a parsed command line against the configured backend.
pub async fn run(cli: Cli) -> Result<()> {
    if let Command::Completion { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "quill", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_default()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    let ctx = AppContext::from_config(config)?;
    dispatch(&ctx, cli.command, &mut std::io::stdout()).await
}

/// Route a command to its implementation.
pub(crate) async fn dispatch<T: Transport + 'static>(
    ctx: &AppContext<T>,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List {
            page,
            limit,
            output,
        } => commands::list::feed(ctx, page, limit, output, out).await,
        Command::User { username, output } => {
            commands::list::by_user(ctx, &username, output, out).await
        }
        Command::Mine { output } => commands::list::mine(ctx, output, out).await,
        Command::Show { id, output } => commands::show::run(ctx, &id, output, out).await,
        Command::New {
            title,
            content,
            description,
            publish,
            output,
        } => {
            let body = commands::read_content(&content)?.unwrap_or_default();
            let mut post = NewPost::new(title, body).published(publish);
            post.description = description;
            commands::new::run(ctx, post, output, out).await
        }
        Command::Edit {
            id,
            title,
            content,
            description,
            publish,
            unpublish,
            output,
        } => {
            let update = PostUpdate {
                title,
                description,
                content: commands::read_content(&content)?,
                published: commands::edit::published_flag(publish, unpublish),
            };
            commands::edit::run(ctx, &id, update, output, out).await
        }
        Command::Delete { id } => commands::delete::run(ctx, &id, out).await,
        Command::Register { username, password } => {
            let credentials = Credentials::new(username, commands::read_password(password)?);
            commands::account::register(ctx, &credentials, out).await
        }
        Command::Login { username, password } => {
            let credentials = Credentials::new(username, commands::read_password(password)?);
            commands::account::login(ctx, &credentials, out).await
        }
        Command::Logout => commands::account::logout(ctx, out),
        Command::Whoami { output } => commands::account::whoami(ctx, output, out),
        Command::Profile {
            username,
            description,
            avatar_file,
        } => {
            let update = ProfileUpdate {
                username,
                description,
                avatar: avatar_file
                    .as_deref()
                    .map(commands::profile::avatar_from_file)
                    .transpose()?,
            };
            commands::profile::run(ctx, update, out).await
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "quill", out);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
