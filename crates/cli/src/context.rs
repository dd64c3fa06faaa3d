// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring of session store, gateway and post sync for one process.

use std::sync::Arc;

use quill_core::{Credentials, ProfileUpdate, User};

use crate::config::Config;
use crate::error::Result;
use crate::gateway::{Gateway, HttpTransport, Transport};
use crate::session::{FileStorage, SessionStorage, SessionStore};
use crate::sync::PostSync;

/// Everything a command needs: one session, one gateway, one cache.
pub struct AppContext<T: Transport = HttpTransport> {
    config: Config,
    session: Arc<SessionStore>,
    gateway: Arc<Gateway<T>>,
    posts: PostSync<T>,
}

impl AppContext {
    /// Build the production context: HTTP transport, file-backed session.
    pub fn from_config(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.api_url)?;
        let storage = FileStorage::new(config.state_dir()?);
        Ok(Self::assemble(config, transport, storage))
    }
}

impl<T: Transport + 'static> AppContext<T> {
    /// Restore any persisted session and hook the cache to identity changes.
    pub fn assemble(config: Config, transport: T, storage: impl SessionStorage + 'static) -> Self {
        let session = Arc::new(SessionStore::new(storage));
        session.restore();
        let gateway = Arc::new(Gateway::new(transport));
        let posts = PostSync::new(
            Arc::clone(&gateway),
            Arc::clone(&session),
            config.cache.stale_times(),
        );
        posts.follow_session();
        AppContext {
            config,
            session,
            gateway,
            posts,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn gateway(&self) -> &Arc<Gateway<T>> {
        &self.gateway
    }

    pub fn posts(&self) -> &PostSync<T> {
        &self.posts
    }

    /// Log in with `credentials` and persist the returned session.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User> {
        credentials.validate_login()?;
        let session = self.gateway.login(credentials).await?;
        let user = session.user.clone();
        self.session.login(session.token, session.user)?;
        Ok(user)
    }

    /// Create an account and log straight into it.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<User> {
        credentials.validate_registration()?;
        let session = self.gateway.register(credentials).await?;
        let user = session.user.clone();
        self.session.login(session.token, session.user)?;
        Ok(user)
    }

    /// Returns the username that was logged out, if any.
    pub fn sign_out(&self) -> Option<String> {
        let previous = self.session.username();
        self.session.logout();
        previous
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        Ok(self.session.update_profile(&self.gateway, update).await?)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
