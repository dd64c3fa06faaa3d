// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

pub use args::{PasswordArgs, PostContentArgs};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "quill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "Read and write posts on a quill blog from the terminal")]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
// Allow the unit type field pattern which is required for clap's ArgAction::Version/Help
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    /// Use a different API base URL for this invocation
    #[arg(long = "api-url", global = true, value_name = "url")]
    pub api_url: Option<String>,

    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Posts
    // ─────────────────────────────────────────────────────────────────────────
    /// List one page of the public feed
    #[command(after_help = colors::examples("\
Examples:
  quill list                  First page, 10 posts
  quill list -p 2 -n 20       Second page of 20
  quill list -o json          Output as JSON"))]
    List {
        /// Page number, starting at 1
        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,

        /// Posts per page
        #[arg(long = "limit", short = 'n', default_value_t = 10)]
        limit: u32,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List a user's published posts
    User {
        username: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List your own posts, drafts included
    Mine {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show a single post
    Show {
        id: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Write a new post (a draft unless --publish is given)
    #[command(after_help = colors::examples("\
Examples:
  quill new \"Hello\" -c \"First post\"        Save a draft
  quill new \"Hello\" -f post.md --publish   Publish from a file
  quill new \"Hello\" -f - < post.md         Read content from stdin"))]
    New {
        title: String,

        #[command(flatten)]
        content: PostContentArgs,

        /// Short summary shown in lists
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Publish immediately
        #[arg(long)]
        publish: bool,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Edit one of your posts
    #[command(after_help = colors::examples("\
Examples:
  quill edit <id> --title \"New title\"   Rename a post
  quill edit <id> --publish             Publish a draft
  quill edit <id> -f post.md            Replace the content"))]
    Edit {
        id: String,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        #[command(flatten)]
        content: PostContentArgs,

        /// New description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Publish the post
        #[arg(long, conflicts_with = "unpublish")]
        publish: bool,

        /// Turn the post back into a draft
        #[arg(long, conflicts_with = "publish")]
        unpublish: bool,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Delete one of your posts
    Delete { id: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Account
    // ─────────────────────────────────────────────────────────────────────────
    /// Create an account and log in
    Register {
        username: String,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Log in to an existing account
    #[command(after_help = colors::examples("\
Examples:
  quill login alice                     Prompt for the password on stdin
  echo \"$PW\" | quill login alice        Read the password from a pipe"))]
    Login {
        username: String,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged in user
    Whoami {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Update your profile
    #[command(after_help = colors::examples("\
Examples:
  quill profile --description \"Writes about Rust\"
  quill profile --avatar-file me.png"))]
    Profile {
        /// New username
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// New profile description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Image file uploaded as the avatar
        #[arg(long = "avatar-file", value_name = "path")]
        avatar_file: Option<std::path::PathBuf>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────────────────────
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
