// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Native transport boundary
//!
//! The client never talks to the network directly. It opens a
//! [`RequestHandle`], lets pre hooks adjust it, and hands it to a
//! [`Transport`] which returns the raw status, headers and body.

mod handle;
mod http;
pub mod mock;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::Result;

pub use handle::{AbortHandle, RequestHandle};
pub use http::HttpTransport;
pub use mock::{MockTransport, SentRequest};

/// Capability the client needs from the underlying HTTP stack
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the opened request and wait for the complete response.
    ///
    /// Any HTTP status is a successful completion; only failures to obtain a
    /// response at all are errors.
    async fn send(&self, handle: &RequestHandle, body: Option<Bytes>) -> Result<RawResponse>;
}

/// Completed exchange as reported by a transport, before normalization
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// Status code
    pub status: u16,
    /// Status text ("OK", "Not Found", ...)
    pub status_text: String,
    /// Raw body bytes
    pub body: Bytes,
    /// All response headers as `name: value` lines joined by CRLF
    pub headers: String,
    /// Final URL after redirects; `None` means the request URL
    pub url: Option<Url>,
}

impl RawResponse {
    /// Create a response with the canonical status text for `status`
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();

        Self {
            status,
            status_text,
            body: body.into(),
            headers: String::new(),
            url: None,
        }
    }

    /// Create a JSON-typed response
    pub fn json(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(status, body).header("Content-Type", "application/json")
    }

    /// Append a header line to the raw header blob
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push_str(name);
        self.headers.push_str(": ");
        self.headers.push_str(value);
        self.headers.push_str("\r\n");
        self
    }

    /// Set the final URL the response was served from
    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Override the status text
    pub fn status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }
}
