// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Observable state of queries and mutations.

use std::sync::Arc;

use quill_core::{Post, PostList, QueryKey};

/// Lifecycle of one query key or mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Cached value of a query. Clones share the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryData {
    List(Arc<PostList>),
    Detail(Arc<Post>),
}

impl QueryData {
    pub fn as_list(&self) -> Option<&Arc<PostList>> {
        match self {
            QueryData::List(list) => Some(list),
            QueryData::Detail(_) => None,
        }
    }

    pub fn as_post(&self) -> Option<&Arc<Post>> {
        match self {
            QueryData::Detail(post) => Some(post),
            QueryData::List(_) => None,
        }
    }

    /// True if both values share the same allocation.
    pub fn ptr_eq(&self, other: &QueryData) -> bool {
        match (self, other) {
            (QueryData::List(a), QueryData::List(b)) => Arc::ptr_eq(a, b),
            (QueryData::Detail(a), QueryData::Detail(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Point-in-time view of one cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySnapshot {
    pub key: QueryKey,
    pub status: QueryStatus,
    /// Last known value, kept across errors and invalidation.
    pub data: Option<QueryData>,
    pub error: Option<String>,
    pub is_fetching: bool,
}

impl QuerySnapshot {
    pub fn idle(key: QueryKey) -> Self {
        QuerySnapshot {
            key,
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
        }
    }
}

/// State of the most recent run of one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationState {
    pub status: QueryStatus,
    pub error: Option<String>,
}

impl OperationState {
    pub fn is_pending(&self) -> bool {
        self.status == QueryStatus::Loading
    }
}
