// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory transport and fixtures shared by gateway, session and sync tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use quill_core::{Post, PostId, User};
use serde::Serialize;
use tokio::sync::oneshot;

use super::transport::{HttpRequest, HttpResponse, Transport, TransportError, TransportResult};

enum Reply {
    Ready(TransportResult<HttpResponse>),
    Deferred(oneshot::Receiver<HttpResponse>),
}

#[derive(Default)]
struct MockState {
    replies: HashMap<String, VecDeque<Reply>>,
    requests: Vec<HttpRequest>,
}

/// Mock transport answering scripted replies per route, in FIFO order.
///
/// Clones share state, so a test can keep one handle after giving another
/// to the gateway.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, route: &str, reply: Reply) {
        self.state
            .lock()
            .unwrap()
            .replies
            .entry(route.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Queue a JSON reply for `route` (e.g. `GET /posts?page=1&limit=10`).
    pub fn reply<B: Serialize>(&self, route: &str, status: u16, body: &B) {
        let body = serde_json::to_string(body).unwrap();
        self.push(route, Reply::Ready(Ok(HttpResponse::new(status, body))));
    }

    /// Queue a raw body for `route`.
    pub fn reply_raw(&self, route: &str, status: u16, body: &str) {
        self.push(route, Reply::Ready(Ok(HttpResponse::new(status, body))));
    }

    /// Queue a transport failure for `route`.
    pub fn fail(&self, route: &str) {
        self.push(
            route,
            Reply::Ready(Err(TransportError::RequestFailed("connection refused".into()))),
        );
    }

    /// Queue a reply for `route` that arrives when the returned sender fires.
    pub fn defer(&self, route: &str) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.push(route, Reply::Deferred(rx));
        tx
    }

    /// All requests executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests executed for `route`.
    pub fn count(&self, route: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.route() == route)
            .count()
    }
}

impl Transport for MockTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<HttpResponse>> + Send + '_>> {
        let route = request.route();
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            state.replies.get_mut(&route).and_then(VecDeque::pop_front)
        };
        Box::pin(async move {
            match reply {
                Some(Reply::Ready(result)) => result,
                Some(Reply::Deferred(rx)) => rx
                    .await
                    .map_err(|_| TransportError::RequestFailed("reply dropped".into())),
                None => Err(TransportError::RequestFailed(format!(
                    "no reply scripted for {route}"
                ))),
            }
        })
    }
}

/// JSON body of a successful response, built from any envelope.
pub fn json<B: Serialize>(body: &B) -> String {
    serde_json::to_string(body).unwrap()
}

pub fn user(username: &str) -> User {
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    User {
        username: username.to_string(),
        description: String::new(),
        avatar: None,
        created_at: at,
        updated_at: at,
    }
}

pub fn post(id: &str, author: &str, published: bool) -> Post {
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    Post {
        id: PostId::new(id),
        title: format!("Post {id}"),
        description: None,
        content: format!("Content of {id}"),
        author: author.to_string(),
        slug: None,
        published,
        created_at: at,
        updated_at: at,
    }
}
