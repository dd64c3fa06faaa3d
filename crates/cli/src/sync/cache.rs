// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Query result cache.
//!
//! Pure state: no I/O and no locking. [`PostSync`](super::PostSync) owns
//! the cache behind a mutex and drives every transition.
//!
//! Every request is tagged with a generation drawn from a cache-wide
//! counter and with the cache epoch. A response is applied only if its
//! entry still expects that generation and the epoch has not moved, so a
//! late response can never overwrite a newer one, land in another key, or
//! resurrect data dropped by [`QueryCache::clear`].

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::{BoxFuture, Shared};
use quill_core::{Post, PostId, QueryKey};

use super::state::{QueryData, QuerySnapshot, QueryStatus};
use crate::gateway::ApiResult;

/// Shared handle to an in-flight fetch. Every clone resolves to the same
/// result.
pub type Fetch = Shared<BoxFuture<'static, ApiResult<QueryData>>>;

struct InFlight {
    generation: u64,
    fetch: Fetch,
}

#[derive(Default)]
struct CacheEntry {
    data: Option<QueryData>,
    fetched_at: Option<u64>,
    invalidated: bool,
    status: QueryStatus,
    error: Option<String>,
    /// Generation of the request whose response this entry will accept.
    generation: u64,
    in_flight: Option<InFlight>,
}

impl CacheEntry {
    fn fresh(&self, now_ms: u64, stale_ms: u64) -> Option<&QueryData> {
        let fetched_at = self.fetched_at?;
        if self.invalidated || now_ms.saturating_sub(fetched_at) >= stale_ms {
            return None;
        }
        self.data.as_ref()
    }

    fn store(&mut self, data: QueryData, now_ms: u64) {
        self.data = Some(data);
        self.fetched_at = Some(now_ms);
        self.invalidated = false;
        self.status = QueryStatus::Success;
        self.error = None;
    }
}

/// Outcome of looking up a key on the read path.
pub(crate) enum Lookup {
    Fresh(QueryData),
    InFlight(Fetch),
    Miss,
}

#[derive(Default)]
pub(crate) struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    epoch: u64,
    last_generation: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn next_generation(&mut self) -> u64 {
        self.last_generation += 1;
        self.last_generation
    }

    pub fn lookup(&self, key: &QueryKey, now_ms: u64, stale_ms: u64) -> Lookup {
        let Some(entry) = self.entries.get(key) else {
            return Lookup::Miss;
        };
        if let Some(data) = entry.fresh(now_ms, stale_ms) {
            return Lookup::Fresh(data.clone());
        }
        match &entry.in_flight {
            Some(in_flight) => Lookup::InFlight(in_flight.fetch.clone()),
            None => Lookup::Miss,
        }
    }

    /// Move `key` to loading for a new request and return the request's
    /// generation. Any older in-flight request is superseded.
    pub fn begin(&mut self, key: &QueryKey) -> u64 {
        let generation = self.next_generation();
        let entry = self.entries.entry(key.clone()).or_default();
        entry.generation = generation;
        entry.status = QueryStatus::Loading;
        entry.error = None;
        entry.in_flight = None;
        generation
    }

    /// Record the shared handle of the request started by [`begin`](Self::begin).
    pub fn attach(&mut self, key: &QueryKey, generation: u64, fetch: Fetch) {
        if let Some(entry) = self.entries.get_mut(key) {
            if entry.generation == generation {
                entry.in_flight = Some(InFlight { generation, fetch });
            }
        }
    }

    /// Apply the outcome of a request. Returns false if it was superseded.
    pub fn complete(
        &mut self,
        key: &QueryKey,
        epoch: u64,
        generation: u64,
        result: &ApiResult<QueryData>,
        now_ms: u64,
    ) -> bool {
        if epoch != self.epoch {
            return false;
        }
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.generation != generation {
            return false;
        }
        if entry
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == generation)
        {
            entry.in_flight = None;
        }
        match result {
            Ok(data) => entry.store(data.clone(), now_ms),
            Err(e) => {
                // last known data stays visible next to the error
                entry.status = QueryStatus::Error;
                entry.error = Some(e.user_message());
            }
        }
        true
    }

    /// Put a confirmed new post into every list it belongs to and seed its
    /// detail entry. Returns the keys whose value changed.
    pub fn insert_created(
        &mut self,
        post: &Post,
        session_user: Option<&str>,
        now_ms: u64,
    ) -> Vec<QueryKey> {
        let mut touched = Vec::new();
        for (key, entry) in &mut self.entries {
            if !key.admits_new(post, session_user) {
                continue;
            }
            if let Some(QueryData::List(list)) = &mut entry.data {
                let list = Arc::make_mut(list);
                list.insert_head(post.clone());
                if let QueryKey::PostsPage { limit, .. } = key {
                    list.posts.truncate(*limit as usize);
                }
                touched.push(key.clone());
            }
        }
        touched.push(self.seed_detail(post, now_ms));
        touched
    }

    /// Swap in the confirmed version of an edited post wherever it appears.
    /// A post that became a draft leaves the public lists instead.
    pub fn replace_updated(&mut self, post: &Post, now_ms: u64) -> Vec<QueryKey> {
        let mut touched = Vec::new();
        for (key, entry) in &mut self.entries {
            if let Some(QueryData::List(list)) = &mut entry.data {
                if list.contains(&post.id) {
                    let list = Arc::make_mut(list);
                    if key.published_only() && !post.published {
                        list.remove(&post.id);
                    } else {
                        list.replace(post);
                    }
                    touched.push(key.clone());
                }
            }
        }
        touched.push(self.seed_detail(post, now_ms));
        touched
    }

    /// Drop a deleted post from every list and evict its detail entry.
    pub fn remove_deleted(&mut self, id: &PostId) -> Vec<QueryKey> {
        let mut touched = Vec::new();
        for (key, entry) in &mut self.entries {
            if let Some(QueryData::List(list)) = &mut entry.data {
                if list.contains(id) {
                    Arc::make_mut(list).remove(id);
                    touched.push(key.clone());
                }
            }
        }
        let detail = QueryKey::PostDetail(id.clone());
        if self.entries.remove(&detail).is_some() {
            touched.push(detail);
        }
        touched
    }

    /// Author of `id` according to any cached value.
    pub fn author_of(&self, id: &PostId) -> Option<String> {
        self.entries
            .values()
            .filter_map(|entry| entry.data.as_ref())
            .find_map(|data| match data {
                QueryData::Detail(post) if &post.id == id => Some(post.author.clone()),
                QueryData::List(list) => list
                    .posts
                    .iter()
                    .find(|p| &p.id == id)
                    .map(|p| p.author.clone()),
                QueryData::Detail(_) => None,
            })
    }

    fn seed_detail(&mut self, post: &Post, now_ms: u64) -> QueryKey {
        let key = QueryKey::PostDetail(post.id.clone());
        let generation = self.next_generation();
        let entry = self.entries.entry(key.clone()).or_default();
        entry.generation = generation;
        entry.in_flight = None;
        entry.store(QueryData::Detail(Arc::new(post.clone())), now_ms);
        key
    }

    /// Mark `key` stale and fence off its in-flight request. Returns false
    /// if the key has no entry.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        let generation = self.next_generation();
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                entry.generation = generation;
                if entry.in_flight.take().is_some() && entry.status == QueryStatus::Loading {
                    entry.status = if entry.data.is_some() {
                        QueryStatus::Success
                    } else {
                        QueryStatus::Idle
                    };
                }
                true
            }
            None => false,
        }
    }

    /// Invalidate every entry matching `predicate`, returning their keys.
    pub fn invalidate_where(&mut self, predicate: impl Fn(&QueryKey) -> bool) -> Vec<QueryKey> {
        let keys: Vec<QueryKey> = self.entries.keys().filter(|k| predicate(k)).cloned().collect();
        for key in &keys {
            self.invalidate(key);
        }
        keys
    }

    /// Evict everything and start a new epoch. Returns the evicted keys.
    pub fn clear(&mut self) -> Vec<QueryKey> {
        self.epoch += 1;
        self.entries.drain().map(|(key, _)| key).collect()
    }

    /// Forget the error of `key`. Returns false if there was none.
    pub fn clear_error(&mut self, key: &QueryKey) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.error.take().is_none() {
            return false;
        }
        if entry.status == QueryStatus::Error {
            entry.status = if entry.data.is_some() {
                QueryStatus::Success
            } else {
                QueryStatus::Idle
            };
        }
        true
    }

    pub fn snapshot(&self, key: &QueryKey) -> QuerySnapshot {
        match self.entries.get(key) {
            Some(entry) => QuerySnapshot {
                key: key.clone(),
                status: entry.status,
                data: entry.data.clone(),
                error: entry.error.clone(),
                is_fetching: entry.in_flight.is_some(),
            },
            None => QuerySnapshot::idle(key.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
