// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::sync::Arc;
use crate::error::Error;
use crate::gateway::test_helpers::{post, user, MockTransport};
use crate::gateway::ApiError;
use crate::session::{MemoryStorage, RawSession};
use quill_core::protocol::{AckResponse, AuthResponse, PostsListResponse, ProfileResponse};

fn context(storage: Arc<MemoryStorage>) -> (AppContext<MockTransport>, MockTransport) {
    let mock = MockTransport::new();
    (
        AppContext::assemble(Config::default(), mock.clone(), storage),
        mock,
    )
}

fn stored(username: &str) -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::with_raw(RawSession {
        token: Some("tok".to_string()),
        user: Some(serde_json::to_string(&user(username)).unwrap()),
    }))
}

#[test]
fn test_assemble_restores_persisted_session() {
    let (ctx, _) = context(stored("alice"));
    assert_eq!(ctx.session().username().as_deref(), Some("alice"));
    assert_eq!(ctx.session().token().as_deref(), Some("tok"));
}

#[test]
fn test_assemble_without_session() {
    let (ctx, _) = context(Arc::new(MemoryStorage::new()));
    assert!(!ctx.session().is_authenticated());
}

#[tokio::test]
async fn test_sign_in_persists_session() {
    let storage = Arc::new(MemoryStorage::new());
    let (ctx, mock) = context(Arc::clone(&storage));
    mock.reply("POST /auth/login", 200, &AuthResponse::ok("t1", user("alice")));

    let signed_in = ctx
        .sign_in(&Credentials::new("alice", "secret1"))
        .await
        .unwrap();

    assert_eq!(signed_in.username, "alice");
    assert_eq!(ctx.session().token().as_deref(), Some("t1"));
    assert_eq!(storage.raw().token.as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_sign_in_rejects_blank_fields_without_request() {
    let (ctx, mock) = context(Arc::new(MemoryStorage::new()));

    let err = ctx.sign_in(&Credentials::new("", "pw")).await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Validation(_))));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_failed_sign_in_keeps_previous_session() {
    let (ctx, mock) = context(stored("alice"));
    mock.reply(
        "POST /auth/login",
        401,
        &AckResponse::failure("Invalid credentials"),
    );

    let err = ctx
        .sign_in(&Credentials::new("bob", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(ctx.session().username().as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_sign_up_validates_registration() {
    let (ctx, mock) = context(Arc::new(MemoryStorage::new()));

    let err = ctx.sign_up(&Credentials::new("al", "secret1")).await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Validation(_))));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_sign_up_logs_in() {
    let (ctx, mock) = context(Arc::new(MemoryStorage::new()));
    mock.reply(
        "POST /auth/register",
        201,
        &AuthResponse::ok("t2", user("carol")),
    );

    ctx.sign_up(&Credentials::new("carol", "secret1"))
        .await
        .unwrap();

    assert_eq!(ctx.session().username().as_deref(), Some("carol"));
}

#[test]
fn test_sign_out_reports_previous_user() {
    let storage = stored("alice");
    let (ctx, _) = context(Arc::clone(&storage));

    assert_eq!(ctx.sign_out().as_deref(), Some("alice"));
    assert_eq!(ctx.sign_out(), None);
    assert_eq!(storage.raw(), RawSession::default());
}

#[tokio::test]
async fn test_sign_out_drops_cached_user_posts() {
    let (ctx, mock) = context(stored("alice"));
    mock.reply(
        "GET /posts/my/all",
        200,
        &PostsListResponse::ok(vec![post("p1", "alice", false)], None),
    );
    ctx.posts().list_mine().await.unwrap();

    ctx.sign_out();

    assert!(ctx.posts().snapshot(&quill_core::QueryKey::MyPosts).data.is_none());
    let err = ctx.posts().list_mine().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthenticated);
}

#[tokio::test]
async fn test_update_profile_replaces_user() {
    let (ctx, mock) = context(stored("alice"));
    let mut updated = user("alice");
    updated.description = "Writes about Rust".to_string();
    mock.reply("PUT /auth/profile", 200, &ProfileResponse::ok(updated));

    let update = ProfileUpdate {
        description: Some("Writes about Rust".to_string()),
        ..ProfileUpdate::default()
    };
    let user = ctx.update_profile(update).await.unwrap();

    assert_eq!(user.description, "Writes about Rust");
    assert_eq!(
        ctx.session().user().unwrap().description,
        "Writes about Rust"
    );
}
