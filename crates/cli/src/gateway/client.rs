// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed operations against the blog REST backend.
//!
//! Each method issues exactly one request and never retries. The gateway
//! holds no session state: callers pass the bearer token per call, and
//! operations that need one fail with [`ApiError::Unauthenticated`]
//! without touching the network when it is missing.

use quill_core::protocol::{
    from_json, AckResponse, AuthResponse, Envelope, PostResponse, PostsListResponse,
    ProfileResponse,
};
use quill_core::{Credentials, NewPost, Post, PostId, PostList, PostUpdate, ProfileUpdate, Session, User};

use super::error::{ApiError, ApiResult};
use super::transport::{HttpRequest, HttpTransport, Transport};

const FETCH_POSTS_FAILED: &str = "Failed to fetch posts";
const FETCH_USER_POSTS_FAILED: &str = "Failed to fetch user posts";
const FETCH_MY_POSTS_FAILED: &str = "Failed to fetch your posts";
const POST_NOT_FOUND: &str = "Post not found";
const CREATE_FAILED: &str = "Failed to create post";
const UPDATE_FAILED: &str = "Failed to update post";
const DELETE_FAILED: &str = "Failed to delete post";
const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const PROFILE_FAILED: &str = "Failed to update profile";

/// Remote post gateway.
pub struct Gateway<T: Transport = HttpTransport> {
    transport: T,
}

/// A decoded success body together with the status it arrived with.
struct Reply<E> {
    status: u16,
    body: E,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T) -> Self {
        Gateway { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One page of the public feed. Parameters pass through verbatim.
    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<PostList> {
        let request = HttpRequest::get(&["posts"])
            .query("page", page)
            .query("limit", limit);
        let reply: Reply<PostsListResponse> = self.send(request, FETCH_POSTS_FAILED).await?;
        Ok(PostList::new(reply.body.posts, reply.body.total))
    }

    /// Published posts of `username`.
    pub async fn list_by_user(&self, username: &str) -> ApiResult<PostList> {
        let request = HttpRequest::get(&["posts", "user", username]);
        let reply: Reply<PostsListResponse> = self.send(request, FETCH_USER_POSTS_FAILED).await?;
        Ok(PostList::new(reply.body.posts, reply.body.total))
    }

    /// Every post of the token's owner, drafts included.
    pub async fn list_mine(&self, token: Option<&str>) -> ApiResult<PostList> {
        let token = require_token(token)?;
        let request = HttpRequest::get(&["posts", "my", "all"]).bearer(Some(token));
        let reply: Reply<PostsListResponse> = self.send(request, FETCH_MY_POSTS_FAILED).await?;
        Ok(PostList::new(reply.body.posts, reply.body.total))
    }

    /// A single post. The token is optional; authors need it to read drafts.
    pub async fn get(&self, id: &PostId, token: Option<&str>) -> ApiResult<Post> {
        let request = HttpRequest::get(&["posts", id.as_str()]).bearer(token);
        let reply: Reply<PostResponse> = self.send(request, POST_NOT_FOUND).await?;
        reply.body.post.ok_or_else(|| ApiError::remote(reply.status, POST_NOT_FOUND))
    }

    pub async fn create(&self, post: &NewPost, token: Option<&str>) -> ApiResult<Post> {
        let token = require_token(token)?;
        let request = with_body(HttpRequest::post(&["posts"]).bearer(Some(token)), post)?;
        let reply: Reply<PostResponse> = self.send(request, CREATE_FAILED).await?;
        reply.body.post.ok_or_else(|| ApiError::remote(reply.status, CREATE_FAILED))
    }

    pub async fn update(
        &self,
        id: &PostId,
        update: &PostUpdate,
        token: Option<&str>,
    ) -> ApiResult<Post> {
        let token = require_token(token)?;
        let request = with_body(
            HttpRequest::put(&["posts", id.as_str()]).bearer(Some(token)),
            update,
        )?;
        let reply: Reply<PostResponse> = self.send(request, UPDATE_FAILED).await?;
        reply.body.post.ok_or_else(|| ApiError::remote(reply.status, UPDATE_FAILED))
    }

    pub async fn delete(&self, id: &PostId, token: Option<&str>) -> ApiResult<()> {
        let token = require_token(token)?;
        let request = HttpRequest::delete(&["posts", id.as_str()]).bearer(Some(token));
        let _: Reply<AckResponse> = self.send(request, DELETE_FAILED).await?;
        Ok(())
    }

    /// Exchange credentials for a session.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let request = with_body(HttpRequest::post(&["auth", "login"]), credentials)?;
        let reply: Reply<AuthResponse> = self.send(request, LOGIN_FAILED).await?;
        into_session(reply, LOGIN_FAILED)
    }

    /// Create an account; the backend logs the new user in directly.
    pub async fn register(&self, credentials: &Credentials) -> ApiResult<Session> {
        let request = with_body(HttpRequest::post(&["auth", "register"]), credentials)?;
        let reply: Reply<AuthResponse> = self.send(request, REGISTRATION_FAILED).await?;
        into_session(reply, REGISTRATION_FAILED)
    }

    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        token: Option<&str>,
    ) -> ApiResult<User> {
        let token = require_token(token)?;
        let request = with_body(
            HttpRequest::put(&["auth", "profile"]).bearer(Some(token)),
            update,
        )?;
        let reply: Reply<ProfileResponse> = self.send(request, PROFILE_FAILED).await?;
        reply.body.user.ok_or_else(|| ApiError::remote(reply.status, PROFILE_FAILED))
    }

    /// Execute `request` and decode its envelope.
    ///
    /// `fallback` is the message used when the body reports failure
    /// without one.
    async fn send<E: Envelope>(&self, request: HttpRequest, fallback: &str) -> ApiResult<Reply<E>> {
        let route = request.route();
        tracing::debug!(%route, "sending request");

        let response = self.transport.execute(request).await.map_err(|e| {
            tracing::debug!(%route, error = %e, "no response");
            ApiError::Network(e.to_string())
        })?;
        let status = response.status;

        if !response.is_success() {
            let message = from_json::<AckResponse>(&response.body)
                .ok()
                .and_then(|ack| ack.message().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP error! status: {status}"));
            tracing::debug!(%route, status, %message, "request rejected");
            return Err(ApiError::remote(status, message));
        }

        let body: E = from_json(&response.body)
            .map_err(|e| ApiError::remote(status, format!("invalid response: {e}")))?;
        if !body.success() {
            let message = body.message().unwrap_or(fallback).to_string();
            tracing::debug!(%route, status, %message, "request unsuccessful");
            return Err(ApiError::remote(status, message));
        }
        Ok(Reply { status, body })
    }
}

fn require_token(token: Option<&str>) -> ApiResult<&str> {
    token
        .filter(|t| !t.trim().is_empty())
        .ok_or(ApiError::Unauthenticated)
}

/// Attach `body` as JSON. A body that cannot be encoded is never sent.
pub(super) fn with_body<B: serde::Serialize>(request: HttpRequest, body: &B) -> ApiResult<HttpRequest> {
    request
        .json(body)
        .map_err(|e| ApiError::Client(e.to_string()))
}

fn into_session(reply: Reply<AuthResponse>, fallback: &str) -> ApiResult<Session> {
    match (reply.body.token, reply.body.user) {
        (Some(token), Some(user)) if !token.is_empty() => Ok(Session::new(token, user)),
        _ => Err(ApiError::remote(reply.status, fallback)),
    }
}
