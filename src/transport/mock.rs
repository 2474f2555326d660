// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory transport that records requests and replays canned responses
//!
//! Useful for exercising hooks without a network:
//!
//! ```rust
//! use std::sync::Arc;
//! use xhook::transport::{MockTransport, RawResponse};
//! use xhook::{AjaxClient, AjaxConfig};
//!
//! # async fn demo() -> xhook::Result<()> {
//! let mock = Arc::new(MockTransport::new());
//! mock.push_response(RawResponse::json(200, r#"{"name":"Nick"}"#));
//!
//! let config = AjaxConfig::new().base_url("http://localhost")?;
//! let client = AjaxClient::with_transport(config, mock.clone());
//! let outcome = client.get_json("/user").await?;
//!
//! assert!(!outcome.is_cancelled());
//! assert_eq!(mock.sent().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

use super::{RawResponse, RequestHandle, Transport};
use crate::error::{Error, Result};

/// A request as the mock transport saw it
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub id: u64,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl SentRequest {
    /// Get a header value as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body as text, lossy conversion
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

#[derive(Debug)]
enum Reply {
    Respond(RawResponse),
    Fail(String),
    Hang,
}

/// Recording transport for tests and offline use
#[derive(Debug)]
pub struct MockTransport {
    sent: Mutex<Vec<SentRequest>>,
    replies: Mutex<VecDeque<Reply>>,
    fallback: Mutex<RawResponse>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Mock that answers `200 OK` with an empty body unless told otherwise
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(RawResponse::new(200, Bytes::new())),
        }
    }

    /// Queue a response for the next request
    pub fn push_response(&self, response: RawResponse) {
        self.replies.lock().push_back(Reply::Respond(response));
    }

    /// Queue a network failure for the next request
    pub fn push_failure(&self, message: impl Into<String>) {
        self.replies.lock().push_back(Reply::Fail(message.into()));
    }

    /// Queue a request that never completes, for abort scenarios
    pub fn push_hang(&self) {
        self.replies.lock().push_back(Reply::Hang);
    }

    /// Response used once the queue is empty
    pub fn set_fallback(&self, response: RawResponse) {
        *self.fallback.lock() = response;
    }

    /// Requests sent so far, in send order
    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().clone()
    }

    /// The most recently sent request
    pub fn last_sent(&self) -> Option<SentRequest> {
        self.sent.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, handle: &RequestHandle, body: Option<Bytes>) -> Result<RawResponse> {
        self.sent.lock().push(SentRequest {
            id: handle.id(),
            method: handle.method.clone(),
            url: handle.url.clone(),
            headers: handle.headers.clone(),
            body,
        });

        let reply = self.replies.lock().pop_front();
        let mut response = match reply {
            Some(Reply::Respond(response)) => response,
            Some(Reply::Fail(message)) => return Err(Error::network(message)),
            Some(Reply::Hang) => std::future::pending().await,
            None => self.fallback.lock().clone(),
        };
        response.url.get_or_insert_with(|| handle.url.clone());
        Ok(response)
    }
}
