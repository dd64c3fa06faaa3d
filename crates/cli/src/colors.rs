// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for help text and post badges.
//!
//! `NO_COLOR=1` disables colors, `COLOR=1` forces them without a TTY.

use std::io::IsTerminal;

use crate::env;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers
    pub const HEADER: u8 = 74;
    /// Commands and literals
    pub const LITERAL: u8 = 250;
    /// Placeholders, hints, dates
    pub const CONTEXT: u8 = 245;
    /// Published badge
    pub const PUBLISHED: u8 = 114;
    /// Draft badge
    pub const DRAFT: u8 = 179;
}

const RESET: &str = "\x1b[0m";

pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn paint(code: u8, text: &str) -> String {
    format!("\x1b[38;5;{code}m{text}{RESET}")
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Color a `Published`/`Draft` badge, if colors are enabled.
pub fn badge(text: &str, published: bool) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    paint(if published { codes::PUBLISHED } else { codes::DRAFT }, text)
}

/// Colorize an examples block shown after a command's help.
///
/// Lines ending in `:` become headers. In `command  description` lines the
/// command part is highlighted, with `<placeholders>` and `"quoted"` words
/// dimmed.
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    let mut lines = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];

        if trimmed.ends_with(':') && !trimmed.contains("  ") {
            lines.push(format!("{indent}{}", header(trimmed)));
        } else if let Some(end) = find_description_start(trimmed) {
            let (cmd, desc) = trimmed.split_at(end);
            lines.push(format!("{indent}{}{desc}", colorize_command(cmd)));
        } else {
            lines.push(line.to_string());
        }
    }
    lines.join("\n")
}

/// Highlight a command line word by word.
pub fn colorize_command(cmd: &str) -> String {
    let mut words = Vec::new();
    let mut rest = cmd;
    while !rest.is_empty() {
        // quoted arguments may contain spaces
        let end = if let Some(stripped) = rest.strip_prefix('"') {
            stripped.find('"').map_or(rest.len(), |i| i + 2)
        } else {
            rest.find(' ').unwrap_or(rest.len())
        };
        let (word, tail) = rest.split_at(end);
        words.push(if word.starts_with('"') || word.starts_with('<') {
            context(word)
        } else {
            literal(word)
        });
        rest = tail.strip_prefix(' ').unwrap_or(tail);
    }
    words.join(" ")
}

/// Byte offset where the description starts: the first run of two or more
/// spaces that is followed by text.
pub fn find_description_start(line: &str) -> Option<usize> {
    let start = line.find("  ")?;
    let after = line[start..].trim_start();
    (!after.is_empty()).then_some(start)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
