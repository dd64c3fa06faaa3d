// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session store and its durable storage.

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, RawSession, SessionStorage, TOKEN_FILE, USER_FILE};
pub use store::{SessionEvent, SessionStore};
