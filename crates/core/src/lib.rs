// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! quill-core: Shared data model for the quill blogging client
//!
//! This crate provides the domain types, wire envelopes, cache keys, and
//! caller-side validation used by the quill session store, gateway, and
//! synchronization layer. It performs no I/O.

pub mod clock;
pub mod error;
pub mod post;
pub mod protocol;
pub mod query;
pub mod user;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use post::{NewPost, Post, PostId, PostList, PostUpdate, EXCERPT_LENGTH};
pub use query::{MutationKey, QueryKey, QueryKind};
pub use user::{Credentials, ProfileUpdate, Session, User};
