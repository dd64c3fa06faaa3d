// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the REST backend.
//!
//! The gateway builds [`HttpRequest`]s and interprets [`HttpResponse`]s;
//! a [`Transport`] only moves them over the wire. Production code uses
//! [`HttpTransport`], tests substitute an in-memory implementation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Base URL could not be parsed or cannot carry a path.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Response arrived but its body could not be read.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// Request body could not be serialized.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// One request against the backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Unencoded path segments; the transport percent-encodes them.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, segments: &[&str]) -> Self {
        HttpRequest {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::Get, segments)
    }

    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::Post, segments)
    }

    pub fn put(segments: &[&str]) -> Self {
        Self::new(Method::Put, segments)
    }

    pub fn delete(segments: &[&str]) -> Self {
        Self::new(Method::Delete, segments)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> TransportResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| TransportError::SerializationError(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Method, path and query, e.g. `GET /posts?page=1&limit=10`.
    pub fn route(&self) -> String {
        let mut route = format!("{} /{}", self.method, self.segments.join("/"));
        for (i, (key, value)) in self.query.iter().enumerate() {
            route.push(if i == 0 { '?' } else { '&' });
            route.push_str(key);
            route.push('=');
            route.push_str(value);
        }
        route
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request to the backend and returns whatever it answered.
///
/// Any response, whatever its status, is `Ok`; `Err` means nothing came
/// back.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<HttpResponse>> + Send + '_>>;
}

/// HTTP transport implementation using reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> TransportResult<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(base_url.to_string()));
        }
        Ok(HttpTransport {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Full URL for `request` with encoded path segments and query.
    pub fn url_for(&self, request: &HttpRequest) -> TransportResult<reqwest::Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<HttpResponse>> + Send + '_>> {
        Box::pin(async move {
            let url = self.url_for(&request)?;
            let mut builder = self
                .client
                .request(request.method.as_reqwest(), url)
                .header(reqwest::header::ACCEPT, "application/json");
            if let Some(token) = &request.bearer {
                builder = builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::RequestFailed(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;
            Ok(HttpResponse { status, body })
        })
    }
}
