// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The session store: single source of truth for who is logged in.

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use quill_core::{ProfileUpdate, Session, User};

use super::storage::{RawSession, SessionStorage};
use crate::error::Result;
use crate::gateway::{ApiError, ApiResult, Gateway, Transport};

/// Change of the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn {
        username: String,
        /// User of the session this login replaced.
        previous: Option<String>,
    },
    LoggedOut {
        previous: Option<String>,
    },
    ProfileUpdated {
        username: String,
        previous_username: String,
    },
}

impl SessionEvent {
    /// True if data cached for the old identity must not be shown anymore.
    pub fn invalidates_user_data(&self) -> bool {
        match self {
            SessionEvent::LoggedOut { .. } => true,
            SessionEvent::LoggedIn { username, previous } => {
                previous.as_ref().is_some_and(|p| p != username)
            }
            SessionEvent::ProfileUpdated {
                username,
                previous_username,
            } => username != previous_username,
        }
    }
}

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Holds the current session in memory and mirrors it to durable storage.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
    listeners: Mutex<Vec<Listener>>,
}

impl SessionStore {
    /// Create an unauthenticated store. Call [`restore`](Self::restore) to
    /// pick up a persisted session.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        SessionStore {
            storage: Box::new(storage),
            current: RwLock::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Load the persisted session, if any.
    ///
    /// Anything short of a complete, parseable token and user pair clears
    /// storage and leaves the store unauthenticated. Returns whether a
    /// session was restored.
    pub fn restore(&self) -> bool {
        let parsed = match self.storage.load() {
            Ok(raw) => parse_session(raw),
            Err(e) => Err(format!("could not read session: {e}")),
        };

        let session = match parsed {
            Ok(session) => session,
            Err(reason) => {
                tracing::warn!(%reason, "discarding stored session");
                if let Err(e) = self.storage.clear() {
                    tracing::warn!(error = %e, "could not clear stored session");
                }
                None
            }
        };

        if let Some(session) = &session {
            tracing::debug!(username = session.username(), "session restored");
        }
        let restored = session.is_some();
        *self.write() = session;
        restored
    }

    /// Make `user` the authenticated identity. No network call.
    ///
    /// The session is persisted before it becomes visible; if persisting
    /// fails the store is left unchanged.
    pub fn login(&self, token: impl Into<String>, user: User) -> Result<()> {
        let session = Session::new(token, user);
        let user_json = serde_json::to_string(&session.user)?;
        let username = session.username().to_string();

        let previous = {
            let mut current = self.write();
            self.storage.save(&session.token, &user_json)?;
            current.replace(session).map(|s| s.user.username)
        };

        tracing::info!(%username, "logged in");
        self.emit(&SessionEvent::LoggedIn { username, previous });
        Ok(())
    }

    /// Forget the session in memory and in storage.
    ///
    /// Never fails; a storage error is logged and the in-memory session is
    /// dropped regardless.
    pub fn logout(&self) {
        let previous = {
            let mut current = self.write();
            if let Err(e) = self.storage.clear() {
                tracing::warn!(error = %e, "could not clear stored session");
            }
            current.take().map(|s| s.user.username)
        };

        if let Some(username) = &previous {
            tracing::info!(%username, "logged out");
        }
        self.emit(&SessionEvent::LoggedOut { previous });
    }

    /// Send a partial profile update for the current user.
    ///
    /// On success the stored user record is replaced. On failure nothing
    /// changes.
    pub async fn update_profile<T: Transport>(
        &self,
        gateway: &Gateway<T>,
        update: ProfileUpdate,
    ) -> ApiResult<User> {
        update.validate()?;
        let token = self.token().ok_or(ApiError::Unauthenticated)?;
        let user = gateway.update_profile(&update, Some(&token)).await?;

        let previous_username = {
            let mut current = self.write();
            match current.as_mut() {
                Some(session) if session.token == token => {
                    match serde_json::to_string(&user) {
                        Ok(json) => {
                            if let Err(e) = self.storage.save(&token, &json) {
                                tracing::warn!(error = %e, "could not persist profile");
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "could not serialize profile"),
                    }
                    Some(std::mem::replace(&mut session.user, user.clone()).username)
                }
                // logged out or switched user while the request was out
                _ => None,
            }
        };

        if let Some(previous_username) = previous_username {
            tracing::info!(username = %user.username, "profile updated");
            self.emit(&SessionEvent::ProfileUpdated {
                username: user.username.clone(),
                previous_username,
            });
        }
        Ok(user)
    }

    pub fn session(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn username(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.user.username.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Register a callback for every [`SessionEvent`].
    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(listener));
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for listener in listeners {
            listener(event);
        }
    }
}

/// A session exists only if both halves are present and valid.
fn parse_session(raw: RawSession) -> std::result::Result<Option<Session>, String> {
    match (raw.token, raw.user) {
        (None, None) => Ok(None),
        (Some(token), Some(user_json)) => {
            let token = token.trim();
            if token.is_empty() {
                return Err("token is blank".to_string());
            }
            let user: User = serde_json::from_str(&user_json)
                .map_err(|e| format!("malformed user record: {e}"))?;
            Ok(Some(Session::new(token, user)))
        }
        (Some(_), None) => Err("user record is missing".to_string()),
        (None, Some(_)) => Err("token is missing".to_string()),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
