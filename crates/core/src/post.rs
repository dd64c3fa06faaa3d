// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Blog post types.
//!
//! [`Post`] is the canonical, server-assigned record. Drafts that have not
//! been submitted yet only exist as a [`NewPost`] payload and therefore never
//! carry an id.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_non_blank, Error, Result};

/// Maximum number of characters of content shown when a post has no description.
pub const EXCERPT_LENGTH: usize = 150;

/// Server-assigned post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        PostId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        PostId(s.to_string())
    }
}

impl From<String> for PostId {
    fn from(s: String) -> Self {
        PostId(s)
    }
}

/// A persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPost")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub title: String,
    /// Author-written summary, preferred over truncated content for excerpts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    /// Username of the author.
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of a post.
///
/// Backends send the id as `_id`, `id`, or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPost {
    #[serde(rename = "_id", default)]
    object_id: Option<PostId>,
    #[serde(default)]
    id: Option<PostId>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    content: String,
    author: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RawPost> for Post {
    type Error = String;

    fn try_from(raw: RawPost) -> std::result::Result<Self, Self::Error> {
        let id = raw
            .object_id
            .or(raw.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "post is missing an id".to_string())?;
        Ok(Post {
            id,
            title: raw.title,
            description: raw.description,
            content: raw.content,
            author: raw.author,
            slug: raw.slug,
            published: raw.published,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl Post {
    /// Short summary for list views.
    ///
    /// The server-supplied description wins; content is truncated only when
    /// the description is absent or blank.
    pub fn excerpt(&self) -> Cow<'_, str> {
        match self.description.as_deref() {
            Some(description) if !description.trim().is_empty() => Cow::Borrowed(description),
            _ => truncate(&self.content, EXCERPT_LENGTH),
        }
    }

    pub fn is_draft(&self) -> bool {
        !self.published
    }

    pub fn is_by(&self, username: &str) -> bool {
        self.author == username
    }
}

/// An ordered list of posts as returned by one list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<Post>,
    /// Server-side total across all pages, when the endpoint reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl PostList {
    pub fn new(posts: Vec<Post>, total: Option<u64>) -> Self {
        PostList { posts, total }
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.posts.iter().any(|p| &p.id == id)
    }

    /// Put `post` first, dropping any older copy of it.
    pub fn insert_head(&mut self, post: Post) {
        // remove() already took the old copy out of the total
        self.remove(&post.id);
        self.posts.insert(0, post);
        if let Some(total) = self.total.as_mut() {
            *total += 1;
        }
    }

    /// Replace the post with the same id in place. Returns false if absent.
    pub fn replace(&mut self, post: &Post) -> bool {
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post.clone();
                true
            }
            None => false,
        }
    }

    /// Remove the post with `id`, returning it.
    pub fn remove(&mut self, id: &PostId) -> Option<Post> {
        let index = self.posts.iter().position(|p| &p.id == id)?;
        let removed = self.posts.remove(index);
        if let Some(total) = self.total.as_mut() {
            *total = total.saturating_sub(1);
        }
        Some(removed)
    }
}

/// Truncate to `max_chars` characters, appending `...` when anything was cut.
pub fn truncate(content: &str, max_chars: usize) -> Cow<'_, str> {
    match content.char_indices().nth(max_chars) {
        None => Cow::Borrowed(content),
        Some((idx, _)) => Cow::Owned(format!("{}...", content[..idx].trim())),
    }
}

/// Payload for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

impl NewPost {
    /// Create an unpublished draft payload.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        NewPost {
            title: title.into(),
            description: None,
            content: content.into(),
            published: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    /// Title and content are required.
    pub fn validate(&self) -> Result<()> {
        require_non_blank("Title", &self.title)?;
        require_non_blank("Content", &self.content)?;
        Ok(())
    }
}

/// Partial update of a post. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.content.is_none()
            && self.published.is_none()
    }

    /// Rejects empty updates and blank required fields.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyUpdate);
        }
        if let Some(title) = &self.title {
            require_non_blank("Title", title)?;
        }
        if let Some(content) = &self.content {
            require_non_blank("Content", content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "post_tests.rs"]
mod tests;
