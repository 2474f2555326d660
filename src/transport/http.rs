// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! reqwest-backed transport

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::Client;

use super::{RawResponse, RequestHandle, Transport};
use crate::error::Result;
use crate::http::AjaxConfig;

/// Transport that performs real HTTP exchanges
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport from client configuration
    pub fn new(config: &AjaxConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::limited(config.max_redirects));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, handle: &RequestHandle, body: Option<Bytes>) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(handle.method.clone(), handle.url.clone())
            .headers(handle.headers.clone());

        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let headers = render_header_blob(response.headers());
        let body = response.bytes().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
            headers,
            url: Some(url),
        })
    }
}

/// Render headers the way a browser reports all response headers: one
/// `name: value` line per name, repeated values joined with `, `.
pub(crate) fn render_header_blob(headers: &HeaderMap) -> String {
    let mut blob = String::new();
    for name in headers.keys() {
        let value = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        blob.push_str(name.as_str());
        blob.push_str(": ");
        blob.push_str(&value);
        blob.push_str("\r\n");
    }
    blob
}
