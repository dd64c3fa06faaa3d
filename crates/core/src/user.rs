// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User, credential and session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_min_chars, require_non_blank, Error, Result};

/// Minimum username length accepted at registration.
pub const MIN_USERNAME_LENGTH: usize = 3;
/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Public profile of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub description: String,
    /// Base64-encoded profile image.
    #[serde(
        rename = "profileImageBase64",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated identity held by the running client.
///
/// Token and user are stored together so a half-present session cannot be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Session {
            token: token.into(),
            user,
        }
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "profileImageBase64",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.description.is_none() && self.avatar.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyUpdate);
        }
        if let Some(username) = &self.username {
            require_non_blank("Username", username)?;
            require_min_chars("Username", username.trim(), MIN_USERNAME_LENGTH)?;
        }
        Ok(())
    }
}

/// Username and password pair for login and registration.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks for a login attempt: both fields present.
    pub fn validate_login(&self) -> Result<()> {
        require_non_blank("Username", &self.username)?;
        require_non_blank("Password", &self.password)?;
        Ok(())
    }

    /// Checks for a new account: minimum username and password lengths.
    pub fn validate_registration(&self) -> Result<()> {
        self.validate_login()?;
        require_min_chars("Password", &self.password, MIN_PASSWORD_LENGTH)?;
        require_min_chars("Username", &self.username, MIN_USERNAME_LENGTH)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
