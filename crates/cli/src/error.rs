// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::gateway::{ApiError, TransportError};

/// All possible errors that can occur in the quill client.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Text shown to the user on failure.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(ApiError::Unauthenticated) => {
                format!("{}\n  hint: run 'quill login' first", ApiError::Unauthenticated)
            }
            Error::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// A specialized Result type for quill operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<quill_core::Error> for Error {
    fn from(e: quill_core::Error) -> Self {
        Error::Api(ApiError::Validation(e))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(format!("failed to parse config: {e}"))
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Config(format!("{e}\n  hint: check api_url or QUILL_API_URL"))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
