// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Open request handle and abort signalling

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tokio::sync::watch;
use url::Url;

use crate::error::{Error, Result};

/// An opened, not yet completed request
///
/// Pre hooks receive it mutably and may add headers or abort it. Clones share
/// the same abort signal.
#[derive(Debug, Clone)]
pub struct RequestHandle {
    id: u64,
    /// Request method
    pub method: Method,
    /// Resolved request URL
    pub url: Url,
    /// Request headers as they will be sent
    pub headers: HeaderMap,
    abort: AbortHandle,
}

impl RequestHandle {
    /// Open a request with no headers set
    pub fn open(id: u64, method: Method, url: Url) -> Self {
        Self {
            id,
            method,
            url,
            headers: HeaderMap::new(),
            abort: AbortHandle::new(),
        }
    }

    /// Client-assigned request id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Set a request header, replacing any previous value
    pub fn set_request_header(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name =
            HeaderName::try_from(name).map_err(|e| Error::invalid_header(name, e))?;
        let header_value =
            HeaderValue::try_from(value).map_err(|e| Error::invalid_header(name, e))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    /// Get a header value as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Abort the request. Takes effect before send or while in flight.
    pub fn abort(&self) {
        self.abort.abort();
    }

    /// Whether abort has been requested
    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }

    /// A cloneable handle that can abort this request from elsewhere
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }
}

/// Shared abort signal for one request
#[derive(Debug, Clone)]
pub struct AbortHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl AbortHandle {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signal abort
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    /// Whether abort has been signalled
    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once abort is signalled
    pub async fn aborted(&self) {
        let mut rx = self.tx.subscribe();
        if rx.wait_for(|aborted| *aborted).await.is_err() {
            // sender lives as long as self, so this never settles
            std::future::pending::<()>().await;
        }
    }
}
