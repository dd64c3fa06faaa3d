// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cache keys for queries and mutations.
//!
//! A [`QueryKey`] identifies one queryable resource together with its
//! parameters. Its string form is the composite key used in logs:
//!
//! | Key | String form |
//! |---|---|
//! | `PostsPage { page: 1, limit: 10 }` | `posts-list-page-1-limit-10` |
//! | `PostDetail("abc")` | `post-detail-abc` |
//! | `PostsByUser("alice")` | `posts-by-user-alice` |
//! | `MyPosts` | `posts-mine` |

use std::fmt;

use crate::post::{Post, PostId};

/// Identifies one cached query result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// One page of the public feed.
    PostsPage { page: u32, limit: u32 },
    /// A single post.
    PostDetail(PostId),
    /// Published posts of one author.
    PostsByUser(String),
    /// All posts of the session user, drafts included.
    MyPosts,
}

/// Resource kind of a [`QueryKey`], without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    PostsPage,
    PostDetail,
    PostsByUser,
    MyPosts,
}

impl QueryKey {
    pub fn page(page: u32, limit: u32) -> Self {
        QueryKey::PostsPage { page, limit }
    }

    pub fn detail(id: impl Into<PostId>) -> Self {
        QueryKey::PostDetail(id.into())
    }

    pub fn by_user(username: impl Into<String>) -> Self {
        QueryKey::PostsByUser(username.into())
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            QueryKey::PostsPage { .. } => QueryKind::PostsPage,
            QueryKey::PostDetail(_) => QueryKind::PostDetail,
            QueryKey::PostsByUser(_) => QueryKind::PostsByUser,
            QueryKey::MyPosts => QueryKind::MyPosts,
        }
    }

    /// True for keys whose value is a list of posts.
    pub fn is_list(&self) -> bool {
        !matches!(self, QueryKey::PostDetail(_))
    }

    /// True for public lists, which never show drafts.
    pub fn published_only(&self) -> bool {
        matches!(self, QueryKey::PostsPage { .. } | QueryKey::PostsByUser(_))
    }

    /// True if a freshly created `post` belongs at the head of this list.
    ///
    /// Public lists only take published posts; only the first feed page
    /// receives new posts. `session_user` decides membership of "my posts".
    pub fn admits_new(&self, post: &Post, session_user: Option<&str>) -> bool {
        match self {
            QueryKey::PostsPage { page, .. } => post.published && *page <= 1,
            QueryKey::PostsByUser(username) => post.published && post.is_by(username),
            QueryKey::MyPosts => session_user.is_some_and(|u| post.is_by(u)),
            QueryKey::PostDetail(_) => false,
        }
    }

    /// True if this list must be refetched after a mutation of a post by `author`.
    pub fn affected_by_author(&self, author: Option<&str>) -> bool {
        match self {
            QueryKey::PostsPage { .. } | QueryKey::MyPosts => true,
            QueryKey::PostsByUser(username) => author.map_or(true, |a| a == username),
            QueryKey::PostDetail(_) => false,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::PostsPage { page, limit } => {
                write!(f, "posts-list-page-{page}-limit-{limit}")
            }
            QueryKey::PostDetail(id) => write!(f, "post-detail-{id}"),
            QueryKey::PostsByUser(username) => write!(f, "posts-by-user-{username}"),
            QueryKey::MyPosts => f.write_str("posts-mine"),
        }
    }
}

/// Identifies the state slot of one write operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationKey {
    Create,
    Update(PostId),
    Delete(PostId),
}

impl fmt::Display for MutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKey::Create => f.write_str("create"),
            MutationKey::Update(id) => write!(f, "update-{id}"),
            MutationKey::Delete(id) => write!(f, "delete-{id}"),
        }
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
