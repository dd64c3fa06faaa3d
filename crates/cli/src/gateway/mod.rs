// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote post gateway.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Gateway   │────►│  Transport  │────►│    REST     │
//! │  (typed)    │◄────│   (trait)   │◄────│   backend   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The gateway turns domain operations into [`HttpRequest`]s, hands them
//! to a [`Transport`], and normalizes every failure into an [`ApiError`].

mod client;
mod error;
mod transport;

pub use client::Gateway;
pub use error::{ApiError, ApiResult, NETWORK_MESSAGE};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, Transport, TransportError, TransportResult,
};

#[cfg(test)]
pub(crate) mod test_helpers;


#[cfg(test)]
mod transport_tests;
