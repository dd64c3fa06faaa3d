// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the transport module.

#![allow(clippy::unwrap_used)]

use super::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use yare::parameterized;

#[test]
fn route_includes_query_in_order() {
    let request = HttpRequest::get(&["posts"])
        .query("page", 1)
        .query("limit", 10);
    assert_eq!(request.route(), "GET /posts?page=1&limit=10");
    assert_eq!(HttpRequest::delete(&["posts", "x"]).route(), "DELETE /posts/x");
}

#[parameterized(
    plain = { "http://localhost:3000/api", &["posts", "abc"], "http://localhost:3000/api/posts/abc" },
    trailing_slash = { "http://localhost:3000/api/", &["posts"], "http://localhost:3000/api/posts" },
    encoded = { "http://localhost:3000/api", &["posts", "user", "a b/c"], "http://localhost:3000/api/posts/user/a%20b%2Fc" },
    root = { "http://example.com", &["auth", "login"], "http://example.com/auth/login" },
)]
fn url_for_encodes_segments(base: &str, segments: &[&str], expected: &str) {
    let transport = HttpTransport::new(base).unwrap();
    let url = transport.url_for(&HttpRequest::get(segments)).unwrap();
    assert_eq!(url.as_str(), expected);
}

#[test]
fn url_for_appends_query() {
    let transport = HttpTransport::new("http://localhost:3000/api").unwrap();
    let request = HttpRequest::get(&["posts"]).query("page", 3).query("limit", 20);
    let url = transport.url_for(&request).unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/api/posts?page=3&limit=20");
}

#[parameterized(
    garbage = { "not a url" },
    mailto = { "mailto:someone@example.com" },
)]
fn rejects_unusable_base_url(base: &str) {
    assert!(matches!(
        HttpTransport::new(base),
        Err(TransportError::InvalidUrl(_))
    ));
}

#[parameterized(
    ok = { 200, true },
    created = { 201, true },
    redirect = { 304, false },
    forbidden = { 403, false },
)]
fn response_success_range(status: u16, expected: bool) {
    assert_eq!(HttpResponse::new(status, "").is_success(), expected);
}
