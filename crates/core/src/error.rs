// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-side validation errors.
//!
//! These are raised before anything is sent to the server.

use thiserror::Error;

/// All possible errors that can occur in quill-core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("{field} must be at least {min} characters long")]
    FieldTooShort {
        field: &'static str,
        actual: usize,
        min: usize,
    },

    #[error("nothing to update\n  hint: change at least one field")]
    EmptyUpdate,
}

impl Error {
    /// Name of the offending field, if the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::FieldEmpty { field } | Error::FieldTooShort { field, .. } => Some(field),
            Error::EmptyUpdate => None,
        }
    }
}

/// A specialized Result type for quill-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject values that are empty after trimming.
pub(crate) fn require_non_blank(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::FieldEmpty { field });
    }
    Ok(())
}

/// Reject values shorter than `min` characters.
pub(crate) fn require_min_chars(field: &'static str, value: &str, min: usize) -> Result<()> {
    let actual = value.chars().count();
    if actual < min {
        return Err(Error::FieldTooShort { field, actual, min });
    }
    Ok(())
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
