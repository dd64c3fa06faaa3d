// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::cli::PostContentArgs;
use crate::commands::read_content;
use crate::commands::testing::{Output, TestContext};
use crate::error::Error;
use crate::gateway::test_helpers::post;
use crate::gateway::ApiError;
use quill_core::protocol::PostResponse;
use tempfile::TempDir;

#[tokio::test]
async fn test_new_draft() {
    let ctx = TestContext::logged_in("alice");
    ctx.mock
        .reply("POST /posts", 201, &PostResponse::ok(post("p9", "alice", false)));
    let mut out = Output::default();

    run(
        &ctx.app,
        NewPost::new("Post p9", "Content of p9"),
        OutputFormat::Text,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(out.text(), "Created p9 (Draft): Post p9\n");
    let sent = ctx.mock.requests()[0].body.clone().unwrap();
    assert_eq!(sent["title"], "Post p9");
    assert_eq!(sent["published"], false);
}

#[tokio::test]
async fn test_new_empty_title_rejected_before_login_check() {
    let ctx = TestContext::new();

    let err = run(
        &ctx.app,
        NewPost::new("", "body"),
        OutputFormat::Text,
        &mut Output::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Validation(_))));
    assert_eq!(err.user_message(), "Title cannot be empty");
    assert!(ctx.mock.requests().is_empty());
}

#[tokio::test]
async fn test_new_requires_login() {
    let ctx = TestContext::new();

    let err = run(
        &ctx.app,
        NewPost::new("Title", "body"),
        OutputFormat::Text,
        &mut Output::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Unauthenticated)));
}

#[test]
fn test_read_content_prefers_inline() {
    let args = PostContentArgs {
        content: Some("inline".to_string()),
        file: None,
    };
    assert_eq!(read_content(&args).unwrap().as_deref(), Some("inline"));
    assert_eq!(read_content(&PostContentArgs::default()).unwrap(), None);
}

#[test]
fn test_read_content_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("post.md");
    std::fs::write(&path, "# Hello\n").unwrap();

    let args = PostContentArgs {
        content: None,
        file: Some(path),
    };
    assert_eq!(read_content(&args).unwrap().as_deref(), Some("# Hello\n"));
}
