// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error shape shared by every gateway and synchronization operation.

use thiserror::Error;

/// Message shown for any failure where no response was received.
pub const NETWORK_MESSAGE: &str = "Network error. Please try again.";

/// Normalized failure of a remote operation.
///
/// Cloneable so one failed fetch can be handed to every caller that
/// awaited it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a failure status or `success: false`.
    #[error("{message} (HTTP {status})")]
    Remote { status: u16, message: String },

    #[error("not logged in")]
    Unauthenticated,

    /// The request could not be built or dispatched locally.
    #[error("request not sent: {0}")]
    Client(String),

    /// Rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] quill_core::Error),
}

impl ApiError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        ApiError::Remote {
            status,
            message: message.into(),
        }
    }

    /// Human-readable text for end users.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            ApiError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for gateway and synchronization operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
