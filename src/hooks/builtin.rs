// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Ready-made hooks

use chrono::Utc;

use super::hook::{ControlSignal, Hook, HookState};
use crate::http::Response;
use crate::transport::RequestHandle;

/// Header entry to inject
#[derive(Debug, Clone)]
struct HeaderEntry {
    name: String,
    value: String,
}

/// Sets headers on every outgoing request, optionally only for some hosts
#[derive(Debug, Clone, Default)]
pub struct HeaderInjector {
    headers: Vec<HeaderEntry>,
    /// Host substrings to inject into (empty = all)
    domains: Vec<String>,
}

impl HeaderInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bearer token
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header("authorization", format!("Bearer {}", token.into()))
    }

    /// Add basic auth
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", username, password),
        );
        self.header("authorization", format!("Basic {}", encoded))
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderEntry {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Restrict to specific domains
    pub fn for_domains(mut self, domains: Vec<String>) -> Self {
        self.domains = domains;
        self
    }

    fn applies_to(&self, request: &RequestHandle) -> bool {
        if self.domains.is_empty() {
            return true;
        }

        request
            .url
            .host_str()
            .map(|host| self.domains.iter().any(|d| host.contains(d.as_str())))
            .unwrap_or(false)
    }
}

impl Hook for HeaderInjector {
    fn name(&self) -> &str {
        "header-injector"
    }

    fn pre(&self, request: &mut RequestHandle, _state: &mut HookState) -> Option<ControlSignal> {
        if !self.applies_to(request) {
            return None;
        }

        for header in &self.headers {
            if let Err(e) = request.set_request_header(&header.name, &header.value) {
                tracing::warn!(header = %header.name, error = %e, "Skipping header");
            }
        }
        None
    }
}

const STARTED_AT: &str = "started_at_ms";

/// Logs each request and its response through `tracing`
#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    /// Log response bodies
    pub log_responses: bool,
    /// Filter by URL pattern
    pub url_filter: Option<String>,
}

impl RequestLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(&self, url: &url::Url) -> bool {
        self.url_filter
            .as_deref()
            .map_or(true, |filter| url.as_str().contains(filter))
    }
}

impl Hook for RequestLogger {
    fn name(&self) -> &str {
        "request-logger"
    }

    fn pre(&self, request: &mut RequestHandle, state: &mut HookState) -> Option<ControlSignal> {
        if !self.matches(&request.url) {
            return None;
        }

        state.insert(STARTED_AT, Utc::now().timestamp_millis());
        tracing::info!(
            request_id = request.id(),
            method = %request.method,
            url = %request.url,
            "Request"
        );
        None
    }

    fn post(&self, response: &Response, state: &mut HookState) -> Option<ControlSignal> {
        // absent when pre skipped this url
        let started = state.get(STARTED_AT).and_then(|v| v.as_i64())?;

        tracing::info!(
            request_id = response.handle.id(),
            url = %response.handle.url,
            status = response.status,
            time_ms = Utc::now().timestamp_millis() - started,
            "Response"
        );

        if self.log_responses {
            tracing::debug!(body = %response.text, "Response body");
        }
        None
    }
}
