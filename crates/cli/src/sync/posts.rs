// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The post synchronization layer.
//!
//! [`PostSync`] is the only thing consumers read post data from. It owns
//! the query cache, starts at most one request per key at a time, and
//! after every confirmed write patches the affected cache entries and
//! marks the lists that may have changed on the server as stale.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures_util::FutureExt;
use quill_core::{
    ClockSource, MutationKey, NewPost, Post, PostId, PostList, PostUpdate, QueryKey, QueryKind,
    Session, SystemClock,
};

use super::cache::{Fetch, Lookup, QueryCache};
use super::state::{OperationState, QueryData, QuerySnapshot, QueryStatus};
use super::subscribers::{Callback, SubscriptionId, Subscribers};
use crate::gateway::{ApiError, ApiResult, Gateway, HttpTransport, Transport};
use crate::session::SessionStore;

/// How long a cached value of each key kind is served without refetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleTimes {
    pub posts_page: Duration,
    pub posts_by_user: Duration,
    pub my_posts: Duration,
    pub post_detail: Duration,
}

impl Default for StaleTimes {
    fn default() -> Self {
        StaleTimes {
            posts_page: Duration::from_secs(120),
            posts_by_user: Duration::from_secs(60),
            my_posts: Duration::from_secs(30),
            post_detail: Duration::from_secs(60),
        }
    }
}

impl StaleTimes {
    pub fn for_kind(&self, kind: QueryKind) -> Duration {
        match kind {
            QueryKind::PostsPage => self.posts_page,
            QueryKind::PostsByUser => self.posts_by_user,
            QueryKind::MyPosts => self.my_posts,
            QueryKind::PostDetail => self.post_detail,
        }
    }

    fn millis(&self, kind: QueryKind) -> u64 {
        u64::try_from(self.for_kind(kind).as_millis()).unwrap_or(u64::MAX)
    }
}

fn lock<M>(mutex: &Mutex<M>) -> MutexGuard<'_, M> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Result of the synchronous half of a read.
enum Pending {
    Ready(QueryData),
    Fetch(Fetch),
}

/// Cached, deduplicated access to posts.
///
/// Cloning is cheap; clones share one cache.
pub struct PostSync<T: Transport = HttpTransport> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport> Clone for PostSync<T> {
    fn clone(&self) -> Self {
        PostSync {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<T: Transport> {
    gateway: Arc<Gateway<T>>,
    session: Arc<SessionStore>,
    clock: Arc<dyn ClockSource>,
    stale: StaleTimes,
    cache: Mutex<QueryCache>,
    mutations: Mutex<HashMap<MutationKey, OperationState>>,
    subscribers: Mutex<Subscribers>,
}

impl<T: Transport + 'static> PostSync<T> {
    pub fn new(gateway: Arc<Gateway<T>>, session: Arc<SessionStore>, stale: StaleTimes) -> Self {
        Self::with_clock(gateway, session, stale, Arc::new(SystemClock))
    }

    pub fn with_clock(
        gateway: Arc<Gateway<T>>,
        session: Arc<SessionStore>,
        stale: StaleTimes,
        clock: Arc<dyn ClockSource>,
    ) -> Self {
        PostSync {
            inner: Arc::new(Inner {
                gateway,
                session,
                clock,
                stale,
                cache: Mutex::new(QueryCache::new()),
                mutations: Mutex::new(HashMap::new()),
                subscribers: Mutex::new(Subscribers::default()),
            }),
        }
    }

    /// Drop all cached data whenever the session changes identity.
    pub fn follow_session(&self) {
        let weak = Arc::downgrade(&self.inner);
        self.inner.session.subscribe(move |event| {
            if !event.invalidates_user_data() {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                inner.invalidate_all();
            }
        });
    }

    /// Read `key`, serving a fresh cached value or joining or starting a
    /// request.
    pub async fn query(&self, key: QueryKey) -> ApiResult<QueryData> {
        match self.inner.read(&key)? {
            Pending::Ready(data) => Ok(data),
            Pending::Fetch(fetch) => fetch.await,
        }
    }

    /// One page of the public feed.
    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<Arc<PostList>> {
        into_list(self.query(QueryKey::page(page, limit)).await?)
    }

    pub async fn get(&self, id: &PostId) -> ApiResult<Arc<Post>> {
        match self.query(QueryKey::PostDetail(id.clone())).await? {
            QueryData::Detail(post) => Ok(post),
            QueryData::List(_) => Err(unexpected_shape()),
        }
    }

    pub async fn list_by_user(&self, username: &str) -> ApiResult<Arc<PostList>> {
        into_list(self.query(QueryKey::by_user(username)).await?)
    }

    /// Posts of the session user. Fails with `Unauthenticated` without a
    /// request when nobody is logged in.
    pub async fn list_mine(&self) -> ApiResult<Arc<PostList>> {
        into_list(self.query(QueryKey::MyPosts).await?)
    }

    /// Start a new request for `key` even if one is in flight. The older
    /// request still resolves for its own callers but no longer updates
    /// the cache.
    pub fn refetch(&self, key: &QueryKey) -> ApiResult<Fetch> {
        self.inner.refetch(key)
    }

    /// Mark `key` stale. Subscribed keys are refetched in the background.
    pub fn invalidate(&self, key: &QueryKey) {
        if lock(&self.inner.cache).invalidate(key) {
            self.inner.after_invalidate(std::slice::from_ref(key));
        }
    }

    /// Evict every entry and ignore every response still in flight.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    pub fn snapshot(&self, key: &QueryKey) -> QuerySnapshot {
        lock(&self.inner.cache).snapshot(key)
    }

    /// Call `callback` on every state change of `key`.
    pub fn subscribe(
        &self,
        key: QueryKey,
        callback: impl Fn(&QuerySnapshot) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let callback: Callback = Arc::new(callback);
        lock(&self.inner.subscribers).add(key, callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        lock(&self.inner.subscribers).remove(id)
    }

    pub fn clear_error(&self, key: &QueryKey) {
        if lock(&self.inner.cache).clear_error(key) {
            self.inner.notify(key);
        }
    }

    /// Publish a new post. Nothing is cached until the server confirms it.
    pub async fn create(&self, post: NewPost) -> ApiResult<Post> {
        self.inner
            .track(MutationKey::Create, self.inner.create(post))
            .await
    }

    pub async fn update(&self, id: &PostId, update: PostUpdate) -> ApiResult<Post> {
        self.inner
            .track(MutationKey::Update(id.clone()), self.inner.update(id, update))
            .await
    }

    pub async fn delete(&self, id: &PostId) -> ApiResult<()> {
        self.inner
            .track(MutationKey::Delete(id.clone()), self.inner.delete(id))
            .await
    }

    pub fn mutation_state(&self, key: &MutationKey) -> OperationState {
        lock(&self.inner.mutations)
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Forget the error of a failed write. The slot goes back to idle.
    pub fn clear_mutation_error(&self, key: &MutationKey) {
        let mut mutations = lock(&self.inner.mutations);
        if mutations.get(key).is_some_and(|state| state.error.is_some()) {
            mutations.remove(key);
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.inner.session
    }
}

fn into_list(data: QueryData) -> ApiResult<Arc<PostList>> {
    match data {
        QueryData::List(list) => Ok(list),
        QueryData::Detail(_) => Err(unexpected_shape()),
    }
}

fn unexpected_shape() -> ApiError {
    ApiError::remote(0, "invalid response: unexpected value for query")
}

impl<T: Transport + 'static> Inner<T> {
    fn token_for(&self, key: &QueryKey) -> ApiResult<Option<String>> {
        let token = self.session.token();
        if *key == QueryKey::MyPosts && token.is_none() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(token)
    }

    fn read(self: &Arc<Self>, key: &QueryKey) -> ApiResult<Pending> {
        let now = self.clock.now_ms();
        let stale_ms = self.stale.millis(key.kind());

        let fetch = {
            let mut cache = lock(&self.cache);
            // read under the cache lock so the token matches the epoch
            let token = self.token_for(key)?;
            match cache.lookup(key, now, stale_ms) {
                Lookup::Fresh(data) => {
                    tracing::debug!(%key, "cache hit");
                    return Ok(Pending::Ready(data));
                }
                Lookup::InFlight(fetch) => {
                    tracing::debug!(%key, "joining request in flight");
                    return Ok(Pending::Fetch(fetch));
                }
                Lookup::Miss => self.start(&mut cache, key, token)?,
            }
        };
        self.notify(key);
        Ok(Pending::Fetch(fetch))
    }

    fn refetch(self: &Arc<Self>, key: &QueryKey) -> ApiResult<Fetch> {
        let fetch = {
            let mut cache = lock(&self.cache);
            let token = self.token_for(key)?;
            self.start(&mut cache, key, token)?
        };
        self.notify(key);
        Ok(fetch)
    }

    /// Spawn the request for `key`. Must be called with the cache locked
    /// so no second request for the key can start in between.
    fn start(
        self: &Arc<Self>,
        cache: &mut QueryCache,
        key: &QueryKey,
        token: Option<String>,
    ) -> ApiResult<Fetch> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ApiError::Client(format!("no async runtime: {e}")))?;

        let generation = cache.begin(key);
        let epoch = cache.epoch();
        tracing::debug!(%key, generation, "cache miss, fetching");

        let inner = Arc::clone(self);
        let task_key = key.clone();
        let task = runtime.spawn(async move {
            let result = inner.fetch(&task_key, token.as_deref()).await;
            inner.finish(&task_key, epoch, generation, &result);
            result
        });
        let fetch = async move {
            task.await
                .unwrap_or_else(|e| Err(ApiError::Client(format!("request task failed: {e}"))))
        }
        .boxed()
        .shared();

        cache.attach(key, generation, fetch.clone());
        Ok(fetch)
    }

    async fn fetch(&self, key: &QueryKey, token: Option<&str>) -> ApiResult<QueryData> {
        let gateway = &self.gateway;
        let data = match key {
            QueryKey::PostsPage { page, limit } => {
                QueryData::List(Arc::new(gateway.list(*page, *limit).await?))
            }
            QueryKey::PostsByUser(username) => {
                QueryData::List(Arc::new(gateway.list_by_user(username).await?))
            }
            QueryKey::MyPosts => QueryData::List(Arc::new(gateway.list_mine(token).await?)),
            QueryKey::PostDetail(id) => QueryData::Detail(Arc::new(gateway.get(id, token).await?)),
        };
        Ok(data)
    }

    fn finish(&self, key: &QueryKey, epoch: u64, generation: u64, result: &ApiResult<QueryData>) {
        let now = self.clock.now_ms();
        let applied = lock(&self.cache).complete(key, epoch, generation, result, now);
        if applied {
            self.notify(key);
        } else {
            tracing::debug!(%key, generation, "dropping superseded response");
        }
    }

    fn notify(&self, key: &QueryKey) {
        let callbacks = lock(&self.subscribers).callbacks(key);
        if callbacks.is_empty() {
            return;
        }
        let snapshot = lock(&self.cache).snapshot(key);
        for callback in callbacks {
            callback(&snapshot);
        }
    }

    fn invalidate_all(&self) {
        let keys = lock(&self.cache).clear();
        // settled write states belong to the old identity
        lock(&self.mutations).retain(|_, state| state.status == QueryStatus::Loading);
        tracing::debug!(entries = keys.len(), "cache cleared");
        for key in &keys {
            self.notify(key);
        }
    }

    /// Notify about stale keys and refetch the ones someone is watching.
    fn after_invalidate(self: &Arc<Self>, keys: &[QueryKey]) {
        for key in keys {
            self.notify(key);
            let watched = lock(&self.subscribers).has(key);
            if watched {
                if let Err(e) = self.refetch(key) {
                    tracing::debug!(%key, error = %e, "background refetch not started");
                }
            }
        }
    }

    /// Publish patched and invalidated keys after a confirmed write.
    fn after_mutation(self: &Arc<Self>, patched: Vec<QueryKey>, stale: Vec<QueryKey>) {
        for key in patched.iter().filter(|k| !stale.contains(k)) {
            self.notify(key);
        }
        self.after_invalidate(&stale);
    }

    async fn track<R>(
        &self,
        key: MutationKey,
        operation: impl Future<Output = ApiResult<R>>,
    ) -> ApiResult<R> {
        self.set_mutation(&key, QueryStatus::Loading, None);
        let result = operation.await;
        match &result {
            Ok(_) => self.set_mutation(&key, QueryStatus::Success, None),
            Err(e) => {
                tracing::debug!(%key, error = %e, "mutation failed");
                self.set_mutation(&key, QueryStatus::Error, Some(e.user_message()));
            }
        }
        result
    }

    fn set_mutation(&self, key: &MutationKey, status: QueryStatus, error: Option<String>) {
        lock(&self.mutations).insert(key.clone(), OperationState { status, error });
    }

    /// Session and cache epoch a write is issued under.
    fn write_session(&self) -> ApiResult<(Session, u64)> {
        let cache = lock(&self.cache);
        let session = self.session.session().ok_or(ApiError::Unauthenticated)?;
        Ok((session, cache.epoch()))
    }

    /// Lock the cache for patching after a confirmed write, unless the
    /// session or the cache epoch changed while the request was out.
    fn cache_for_write(&self, token: &str, epoch: u64) -> Option<MutexGuard<'_, QueryCache>> {
        let cache = lock(&self.cache);
        let current =
            cache.epoch() == epoch && self.session.token().is_some_and(|t| t == token);
        current.then_some(cache)
    }

    async fn create(self: &Arc<Self>, post: NewPost) -> ApiResult<Post> {
        post.validate()?;
        let (session, epoch) = self.write_session()?;
        let created = self.gateway.create(&post, Some(&session.token)).await?;
        tracing::info!(id = %created.id, published = created.published, "post created");

        let now = self.clock.now_ms();
        let (patched, stale) = {
            let Some(mut cache) = self.cache_for_write(&session.token, epoch) else {
                tracing::debug!(id = %created.id, "session changed, created post not cached");
                return Ok(created);
            };
            let patched = cache.insert_created(&created, Some(session.username()), now);
            let stale = cache.invalidate_where(|k| k.affected_by_author(Some(&created.author)));
            (patched, stale)
        };
        self.after_mutation(patched, stale);
        Ok(created)
    }

    async fn update(self: &Arc<Self>, id: &PostId, update: PostUpdate) -> ApiResult<Post> {
        update.validate()?;
        let (session, epoch) = self.write_session()?;
        let updated = self.gateway.update(id, &update, Some(&session.token)).await?;
        tracing::info!(%id, "post updated");

        let now = self.clock.now_ms();
        let (patched, stale) = {
            let Some(mut cache) = self.cache_for_write(&session.token, epoch) else {
                tracing::debug!(%id, "session changed, updated post not cached");
                return Ok(updated);
            };
            let patched = cache.replace_updated(&updated, now);
            let stale = cache.invalidate_where(|k| k.affected_by_author(Some(&updated.author)));
            (patched, stale)
        };
        self.after_mutation(patched, stale);
        Ok(updated)
    }

    async fn delete(self: &Arc<Self>, id: &PostId) -> ApiResult<()> {
        let (session, epoch) = self.write_session()?;
        let author = lock(&self.cache).author_of(id);
        self.gateway.delete(id, Some(&session.token)).await?;
        tracing::info!(%id, "post deleted");
        // the post is gone, so is any leftover edit state
        lock(&self.mutations).remove(&MutationKey::Update(id.clone()));

        let (patched, stale) = {
            let Some(mut cache) = self.cache_for_write(&session.token, epoch) else {
                tracing::debug!(%id, "session changed, deletion not applied to cache");
                return Ok(());
            };
            let patched = cache.remove_deleted(id);
            let stale = cache.invalidate_where(|k| k.affected_by_author(author.as_deref()));
            (patched, stale)
        };
        self.after_mutation(patched, stale);
        Ok(())
    }
}
