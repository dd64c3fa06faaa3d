// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Argument groups shared by several commands.

use std::path::PathBuf;

use clap::Args;

/// Post body given inline or read from a file.
#[derive(Args, Clone, Debug, Default)]
pub struct PostContentArgs {
    /// Post content
    #[arg(long, short = 'c', conflicts_with = "file")]
    pub content: Option<String>,

    /// Read the content from a file (`-` for stdin)
    #[arg(long, short = 'f', value_name = "path", conflicts_with = "content")]
    pub file: Option<PathBuf>,
}

/// Password given on the command line or read from stdin.
#[derive(Args, Clone, Debug, Default)]
pub struct PasswordArgs {
    /// Password (read from stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}
