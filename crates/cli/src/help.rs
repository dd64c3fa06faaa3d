// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Clap styles matching the palette in [`colors::codes`].
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let fg = |code: u8| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));

    Styles::styled()
        .header(fg(colors::codes::HEADER))
        .usage(fg(colors::codes::HEADER))
        .literal(fg(colors::codes::LITERAL))
        .placeholder(fg(colors::codes::CONTEXT))
        .valid(fg(colors::codes::CONTEXT))
}

/// Main help template with the command list before the options.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands grouped by topic, shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_posts}
  {list}        List the public feed
  {user}        List a user's published posts
  {mine}        List your posts, drafts included
  {show}        Show a post
  {new}         Write a new post
  {edit}        Edit one of your posts
  {delete}      Delete one of your posts

{header_account}
  {register}    Create an account
  {login}       Log in
  {logout}      Log out
  {whoami}      Show the logged in user
  {profile}     Update your profile

{header_setup}
  {completion}  Generate shell completions
",
        header_posts = colors::header("Posts:"),
        header_account = colors::header("Account:"),
        header_setup = colors::header("Setup:"),
        list = colors::literal("list"),
        user = colors::literal("user"),
        mine = colors::literal("mine"),
        show = colors::literal("show"),
        new = colors::literal("new"),
        edit = colors::literal("edit"),
        delete = colors::literal("delete"),
        register = colors::literal("register"),
        login = colors::literal("login"),
        logout = colors::literal("logout"),
        whoami = colors::literal("whoami"),
        profile = colors::literal("profile"),
        completion = colors::literal("completion"),
    )
}

/// Quickstart shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  quill register alice            Create an account
  quill new \"Hello\" -c <text>     Write a draft
  quill mine                      List your posts
  quill edit <id> --publish       Publish it",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
