// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use quill_core::{Post, PostList, User};

use crate::colors;

/// Maximum line width for wrapped post content (excluding indent).
const WRAP_WIDTH: usize = 80;

/// Long-form date, e.g. `January 2, 2026`.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

pub fn status_label(post: &Post) -> &'static str {
    if post.published {
        "Published"
    } else {
        "Draft"
    }
}

fn badge(post: &Post) -> String {
    colors::badge(&format!("[{}]", status_label(post)), post.published)
}

/// Wrap text at word boundaries if it's a single line.
///
/// Multi-line content keeps the author's line breaks.
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.chars().count() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// One post as shown in list output.
///
/// ```text
/// Hello world [Draft]
///   p1 - by alice - January 2, 2026
///   First lines of the post...
/// ```
pub fn format_post_summary(post: &Post, with_status: bool) -> Vec<String> {
    let title = if with_status {
        format!("{} {}", post.title, badge(post))
    } else {
        post.title.clone()
    };
    vec![
        title,
        format!(
            "  {} - by {} - {}",
            post.id,
            post.author,
            format_date(&post.created_at)
        ),
        format!("  {}", post.excerpt()),
    ]
}

/// Posts separated by blank lines, with a count footer.
pub fn format_post_list(list: &PostList, with_status: bool) -> String {
    if list.posts.is_empty() {
        return "No posts found.".to_string();
    }
    let mut blocks: Vec<String> = list
        .posts
        .iter()
        .map(|post| format_post_summary(post, with_status).join("\n"))
        .collect();
    blocks.push(match list.total {
        Some(total) => format!("Showing {} of {} posts", list.posts.len(), total),
        None => format!("{} posts", list.posts.len()),
    });
    blocks.join("\n\n")
}

pub fn format_post_details(post: &Post) -> String {
    let mut lines = vec![
        format!("{} {}", post.title, badge(post)),
        format!("by {} on {}", post.author, format_date(&post.created_at)),
    ];
    if post.updated_at != post.created_at {
        lines.push(format!("updated {}", format_date(&post.updated_at)));
    }
    lines.push(format!("id: {}", post.id));
    if let Some(slug) = &post.slug {
        lines.push(format!("slug: {slug}"));
    }
    if let Some(description) = post.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(String::new());
        lines.push(description.to_string());
    }
    lines.push(String::new());
    for line in wrap_text(&post.content, WRAP_WIDTH).lines() {
        lines.push(format!("    {line}"));
    }
    lines.join("\n")
}

pub fn format_user(user: &User) -> String {
    let mut lines = vec![user.username.clone()];
    if !user.description.trim().is_empty() {
        lines.push(format!("  {}", user.description));
    }
    lines.push(format!("  member since {}", format_date(&user.created_at)));
    if user.avatar.is_some() {
        lines.push("  avatar: set".to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
