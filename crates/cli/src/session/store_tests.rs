// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use super::*;
use crate::gateway::test_helpers::{json, user, MockTransport};
use crate::session::MemoryStorage;
use quill_core::protocol::ProfileResponse;
use yare::parameterized;

fn store() -> (SessionStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    (SessionStore::new(Arc::clone(&storage)), storage)
}

fn store_with(raw: RawSession) -> (SessionStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::with_raw(raw));
    (SessionStore::new(Arc::clone(&storage)), storage)
}

fn recorded(store: &SessionStore) -> Arc<Mutex<Vec<SessionEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    store.subscribe(move |e| sink.lock().unwrap().push(e.clone()));
    events
}

#[test]
fn login_persists_and_authenticates() {
    let (store, storage) = store();
    assert!(!store.is_authenticated());

    store.login("tok", user("alice")).unwrap();

    assert!(store.is_authenticated());
    assert_eq!(store.token().as_deref(), Some("tok"));
    assert_eq!(store.username().as_deref(), Some("alice"));
    let raw = storage.raw();
    assert_eq!(raw.token.as_deref(), Some("tok"));
    let saved: quill_core::User = serde_json::from_str(raw.user.as_deref().unwrap()).unwrap();
    assert_eq!(saved, user("alice"));
}

#[test]
fn restore_round_trips_login() {
    let (store, storage) = store();
    store.login("tok", user("alice")).unwrap();

    let restored = SessionStore::new(Arc::clone(&storage));
    assert!(restored.restore());
    assert_eq!(restored.session(), store.session());
}

#[test]
fn restore_with_nothing_stored() {
    let (store, _) = store();
    assert!(!store.restore());
    assert!(!store.is_authenticated());
}

#[parameterized(
    token_only = { Some("tok"), None },
    user_only = { None, Some(r#"{"username":"alice","createdAt":"2026-01-02T03:04:05Z","updatedAt":"2026-01-02T03:04:05Z"}"#) },
    blank_token = { Some("  "), Some(r#"{"username":"alice","createdAt":"2026-01-02T03:04:05Z","updatedAt":"2026-01-02T03:04:05Z"}"#) },
    malformed_user = { Some("tok"), Some("{not json") },
    user_missing_fields = { Some("tok"), Some(r#"{"description":"x"}"#) },
)]
fn restore_clears_corrupt_state(token: Option<&str>, user_json: Option<&str>) {
    let (store, storage) = store_with(RawSession {
        token: token.map(String::from),
        user: user_json.map(String::from),
    });

    assert!(!store.restore());
    assert!(!store.is_authenticated());
    assert_eq!(storage.raw(), RawSession::default());
}

#[test]
fn logout_clears_everything_and_is_idempotent() {
    let (store, storage) = store();
    let events = recorded(&store);
    store.login("tok", user("alice")).unwrap();

    store.logout();
    store.logout();

    assert!(!store.is_authenticated());
    assert_eq!(storage.raw(), RawSession::default());
    let events = events.lock().unwrap();
    assert_eq!(
        events[1],
        SessionEvent::LoggedOut {
            previous: Some("alice".to_string())
        }
    );
    assert_eq!(events[2], SessionEvent::LoggedOut { previous: None });
}

#[test]
fn login_reports_replaced_user() {
    let (store, _) = store();
    let events = recorded(&store);
    store.login("t1", user("alice")).unwrap();
    store.login("t2", user("bob")).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(
        events[1],
        SessionEvent::LoggedIn {
            username: "bob".to_string(),
            previous: Some("alice".to_string()),
        }
    );
    assert!(events[1].invalidates_user_data());
    assert!(!events[0].invalidates_user_data());
}

#[parameterized(
    logout = { SessionEvent::LoggedOut { previous: None }, true },
    fresh_login = { SessionEvent::LoggedIn { username: "a".into(), previous: None }, false },
    same_user = { SessionEvent::LoggedIn { username: "a".into(), previous: Some("a".into()) }, false },
    rename = { SessionEvent::ProfileUpdated { username: "b".into(), previous_username: "a".into() }, true },
    description = { SessionEvent::ProfileUpdated { username: "a".into(), previous_username: "a".into() }, false },
)]
fn event_invalidation(event: SessionEvent, expected: bool) {
    assert_eq!(event.invalidates_user_data(), expected);
}

#[tokio::test]
async fn update_profile_requires_session() {
    let (store, _) = store();
    let mock = MockTransport::new();
    let gateway = Gateway::new(mock.clone());
    let update = ProfileUpdate {
        description: Some("hi".into()),
        ..Default::default()
    };

    let err = store.update_profile(&gateway, update).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthenticated);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn update_profile_rejects_empty_update_locally() {
    let (store, _) = store();
    store.login("tok", user("alice")).unwrap();
    let mock = MockTransport::new();
    let gateway = Gateway::new(mock.clone());

    let err = store
        .update_profile(&gateway, ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn update_profile_replaces_user_on_success() {
    let (store, storage) = store();
    store.login("tok", user("alice")).unwrap();
    let events = recorded(&store);
    let mock = MockTransport::new();
    let gateway = Gateway::new(mock.clone());
    let mut updated = user("alice");
    updated.description = "writes about rust".to_string();
    mock.reply("PUT /auth/profile", 200, &ProfileResponse::ok(updated.clone()));

    let update = ProfileUpdate {
        description: Some("writes about rust".into()),
        ..Default::default()
    };
    let user = store.update_profile(&gateway, update).await.unwrap();

    assert_eq!(user, updated);
    assert_eq!(store.user(), Some(updated.clone()));
    assert_eq!(storage.raw().user.as_deref(), Some(json(&updated).as_str()));
    assert_eq!(mock.requests()[0].bearer.as_deref(), Some("tok"));
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn update_profile_failure_leaves_state() {
    let (store, storage) = store();
    store.login("tok", user("alice")).unwrap();
    let before = storage.raw();
    let mock = MockTransport::new();
    let gateway = Gateway::new(mock.clone());
    mock.reply_raw(
        "PUT /auth/profile",
        409,
        r#"{"success":false,"message":"Username already taken"}"#,
    );

    let update = ProfileUpdate {
        username: Some("bobby".into()),
        ..Default::default()
    };
    let err = store.update_profile(&gateway, update).await.unwrap_err();

    assert_eq!(err, ApiError::remote(409, "Username already taken"));
    assert_eq!(store.user(), Some(user("alice")));
    assert_eq!(storage.raw(), before);
}
