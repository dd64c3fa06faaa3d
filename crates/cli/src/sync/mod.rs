// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Post synchronization layer.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Consumer   │────►│  PostSync   │────►│   Gateway   │
//! │ (CLI, view) │◄────│  + cache    │◄────│             │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  Session    │  (token, identity changes)
//!                     └─────────────┘
//! ```
//!
//! # Features
//!
//! - Per-key status: idle, loading, success or error
//! - Single-flight requests per key
//! - Stale responses never overwrite newer data
//! - Cache patched from confirmed writes, affected lists marked stale
//! - Change callbacks per key

mod cache;
mod posts;
mod state;
mod subscribers;

pub use cache::Fetch;
pub use posts::{PostSync, StaleTimes};
pub use state::{OperationState, QueryData, QuerySnapshot, QueryStatus};
pub use subscribers::SubscriptionId;
