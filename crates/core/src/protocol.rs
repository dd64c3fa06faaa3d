// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON envelopes exchanged with the blog REST backend.
//!
//! Every response body carries a `success` flag and an optional
//! human-readable `message`; the payload fields depend on the endpoint:
//! - `GET /posts` → [`PostsListResponse`] with `posts` and `total`
//! - `GET /posts/{id}`, `POST /posts`, `PUT /posts/{id}` → [`PostResponse`]
//! - `DELETE /posts/{id}` → [`AckResponse`]
//! - `POST /auth/login`, `POST /auth/register` → [`AuthResponse`]
//! - `PUT /auth/profile` → [`ProfileResponse`]

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::post::Post;
use crate::user::User;

/// Common accessors shared by every response body.
pub trait Envelope: DeserializeOwned {
    fn success(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

macro_rules! envelope {
    ($ty:ty) => {
        impl Envelope for $ty {
            fn success(&self) -> bool {
                self.success
            }

            fn message(&self) -> Option<&str> {
                self.message.as_deref().filter(|m| !m.is_empty())
            }
        }
    };
}

/// Body with no payload, used by delete and by error responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Page of posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub posts: Vec<Post>,
    /// Total number of published posts; only sent by the paged feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Single post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}

/// Login or registration result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Profile update result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

envelope!(AckResponse);
envelope!(PostsListResponse);
envelope!(PostResponse);
envelope!(AuthResponse);
envelope!(ProfileResponse);

impl AckResponse {
    pub fn ok() -> Self {
        AckResponse {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        AckResponse {
            success: false,
            message: Some(message.into()),
        }
    }
}

impl PostsListResponse {
    pub fn ok(posts: Vec<Post>, total: Option<u64>) -> Self {
        PostsListResponse {
            success: true,
            message: None,
            posts,
            total,
        }
    }
}

impl PostResponse {
    pub fn ok(post: Post) -> Self {
        PostResponse {
            success: true,
            message: None,
            post: Some(post),
        }
    }
}

impl AuthResponse {
    pub fn ok(token: impl Into<String>, user: User) -> Self {
        AuthResponse {
            success: true,
            message: None,
            token: Some(token.into()),
            user: Some(user),
        }
    }
}

impl ProfileResponse {
    pub fn ok(user: User) -> Self {
        ProfileResponse {
            success: true,
            message: None,
            user: Some(user),
        }
    }
}

/// Serialize any envelope to a JSON string.
pub fn to_json<T: Serialize>(body: &T) -> serde_json::Result<String> {
    serde_json::to_string(body)
}

/// Deserialize an envelope from a JSON string.
pub fn from_json<T: Envelope>(json: &str) -> serde_json::Result<T> {
    serde_json::from_str(json)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
