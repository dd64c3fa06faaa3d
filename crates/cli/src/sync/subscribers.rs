// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-key change callbacks.

use std::collections::HashMap;
use std::sync::Arc;

use quill_core::QueryKey;

use super::state::QuerySnapshot;

/// Callback invoked with the new state of a key.
pub type Callback = Arc<dyn Fn(&QuerySnapshot) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Subscribers {
    last_id: u64,
    by_key: HashMap<QueryKey, Vec<(SubscriptionId, Callback)>>,
}

impl Subscribers {
    pub fn add(&mut self, key: QueryKey, callback: Callback) -> SubscriptionId {
        self.last_id += 1;
        let id = SubscriptionId(self.last_id);
        self.by_key.entry(key).or_default().push((id, callback));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        self.by_key.retain(|_, subs| {
            let before = subs.len();
            subs.retain(|(sub, _)| *sub != id);
            removed |= subs.len() != before;
            !subs.is_empty()
        });
        removed
    }

    pub fn has(&self, key: &QueryKey) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn callbacks(&self, key: &QueryKey) -> Vec<Callback> {
        self.by_key
            .get(key)
            .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default()
    }
}
