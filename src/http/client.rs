// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request executor

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

use super::body::{encode_form, JsonBody};
use super::config::AjaxConfig;
use super::headers::{
    ACCEPT, CACHE_CONTROL, CONTENT_TYPE, IF_MODIFIED_SINCE, PRAGMA, X_REQUESTED_WITH,
};
use super::outcome::{Cancellation, Outcome};
use super::request::AjaxRequest;
use super::response::Response;
use super::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::hooks::{Hook, HookRegistry};
use crate::transport::{HttpTransport, RequestHandle, Transport};

/// AJAX-style client: verbs, JSON helpers and the hook pipeline
///
/// Clones share the transport, the hook registry and the allow-caching flag.
#[derive(Clone)]
pub struct AjaxClient {
    config: Arc<AjaxConfig>,
    transport: Arc<dyn Transport>,
    hooks: HookRegistry,
    allow_caching: Arc<AtomicBool>,
    next_id: Arc<AtomicU64>,
}

impl AjaxClient {
    /// Create a client with default configuration over HTTP
    pub fn new() -> Result<Self> {
        Self::with_config(AjaxConfig::default())
    }

    /// Create a client over HTTP with custom configuration
    pub fn with_config(config: AjaxConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over any transport
    pub fn with_transport(config: AjaxConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            allow_caching: Arc::new(AtomicBool::new(config.allow_caching)),
            config: Arc::new(config),
            transport,
            hooks: HookRegistry::new(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Get client configuration
    pub fn config(&self) -> &AjaxConfig {
        &self.config
    }

    /// Whether caching headers are currently left alone
    pub fn allow_caching(&self) -> bool {
        self.allow_caching.load(Ordering::Relaxed)
    }

    /// Allow or suppress caching for requests issued from now on
    pub fn set_allow_caching(&self, allow: bool) {
        self.allow_caching.store(allow, Ordering::Relaxed);
    }

    /// The hook registry
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Replace all hooks
    pub fn set_hooks(&self, hooks: Vec<Arc<dyn Hook>>) {
        self.hooks.set_hooks(hooks);
    }

    /// Append hooks after the existing ones
    pub fn add_hooks(&self, hooks: Vec<Arc<dyn Hook>>) {
        self.hooks.add_hooks(hooks);
    }

    /// Remove all hooks
    pub fn remove_hooks(&self) {
        self.hooks.remove_hooks();
    }

    /// Issue one request through the hook pipeline.
    ///
    /// Resolves with [`Outcome::Cancelled`] when a pre hook cancels, and with
    /// [`Outcome::Completed`] for any response status. Fails when a post hook
    /// cancels, on abort, or on transport failure.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<Outcome> {
        let url = self.config.resolve_url(url)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut handle = RequestHandle::open(id, method, url);
        let mut hooks = self.hooks.bind();

        self.prepare_headers(&mut handle, headers)?;

        if let Some(signal) = hooks.run_pre(&mut handle) {
            return Ok(Outcome::Cancelled(Cancellation::new(signal.reason, handle)));
        }

        if handle.is_aborted() {
            tracing::debug!(request_id = id, "Request aborted before send");
            return Err(Error::aborted(handle));
        }

        let body = if handle.method == Method::GET { None } else { body };

        tracing::debug!(
            request_id = id,
            method = %handle.method,
            url = %handle.url,
            hooks = hooks.len(),
            "Sending request"
        );

        let abort = handle.abort_handle();
        let sent = tokio::select! {
            result = self.transport.send(&handle, body) => Some(result),
            _ = abort.aborted() => None,
        };

        let raw = match sent {
            Some(Ok(raw)) => raw,
            Some(Err(e)) => {
                tracing::warn!(request_id = id, url = %handle.url, error = %e, "Request failed");
                return Err(e);
            }
            None => {
                tracing::debug!(request_id = id, "Request aborted in flight");
                return Err(Error::aborted(handle));
            }
        };

        let response = Response::from_raw(raw, handle);
        tracing::debug!(request_id = id, status = response.status, "Response received");

        if let Some(signal) = hooks.run_post(&response) {
            return Err(Error::cancelled(signal.reason, response.handle));
        }

        Ok(Outcome::Completed(response))
    }

    /// Caller headers first, then no-cache defaults the caller did not set,
    /// then the requested-with marker.
    fn prepare_headers(&self, handle: &mut RequestHandle, headers: HeaderMap) -> Result<()> {
        handle.headers = headers;

        if !self.allow_caching() {
            let if_modified_since = self.config.if_modified_since_header();
            let defaults = [
                (CACHE_CONTROL, "no-cache"),
                (PRAGMA, "no-cache"),
                (IF_MODIFIED_SINCE, if_modified_since.as_str()),
            ];
            for (name, value) in defaults {
                if !handle.headers.contains_key(name) {
                    handle.set_request_header(name, value)?;
                }
            }
        }

        handle.set_request_header(X_REQUESTED_WITH, &self.config.requested_with)
    }

    /// Execute a GET request. No body is ever sent.
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<Outcome> {
        self.request(Method::GET, url, headers, None).await
    }

    /// Execute a POST request
    pub async fn post(&self, url: &str, headers: HeaderMap, body: Option<Bytes>) -> Result<Outcome> {
        self.request(Method::POST, url, headers, body).await
    }

    /// Execute a PUT request
    pub async fn put(&self, url: &str, headers: HeaderMap, body: Option<Bytes>) -> Result<Outcome> {
        self.request(Method::PUT, url, headers, body).await
    }

    /// Execute a PATCH request
    pub async fn patch(&self, url: &str, headers: HeaderMap, body: Option<Bytes>) -> Result<Outcome> {
        self.request(Method::PATCH, url, headers, body).await
    }

    /// Execute a DELETE request
    pub async fn delete(&self, url: &str, headers: HeaderMap, body: Option<Bytes>) -> Result<Outcome> {
        self.request(Method::DELETE, url, headers, body).await
    }

    /// GET with `Accept: application/json`
    pub async fn get_json(&self, url: &str) -> Result<Outcome> {
        self.get(url, json_headers(false)).await
    }

    /// POST a JSON body
    pub async fn post_json(&self, url: &str, body: impl Into<JsonBody>) -> Result<Outcome> {
        self.send_json(Method::POST, url, body.into()).await
    }

    /// PUT a JSON body
    pub async fn put_json(&self, url: &str, body: impl Into<JsonBody>) -> Result<Outcome> {
        self.send_json(Method::PUT, url, body.into()).await
    }

    /// PATCH a JSON body
    pub async fn patch_json(&self, url: &str, body: impl Into<JsonBody>) -> Result<Outcome> {
        self.send_json(Method::PATCH, url, body.into()).await
    }

    /// DELETE with a JSON body
    pub async fn delete_json(&self, url: &str, body: impl Into<JsonBody>) -> Result<Outcome> {
        self.send_json(Method::DELETE, url, body.into()).await
    }

    /// DELETE with JSON headers and no body
    pub async fn delete_json_empty(&self, url: &str) -> Result<Outcome> {
        self.delete(url, json_headers(true), None).await
    }

    async fn send_json(&self, method: Method, url: &str, body: JsonBody) -> Result<Outcome> {
        let text = body.into_text()?;
        self.request(method, url, json_headers(true), Some(Bytes::from(text)))
            .await
    }

    /// POST a flat object as a url-encoded form.
    ///
    /// Encoding happens immediately: a nested object is reported here, before
    /// any request exists, rather than from the returned future.
    ///
    /// ```rust,no_run
    /// # async fn demo(client: xhook::AjaxClient) -> xhook::Result<()> {
    /// use serde_json::json;
    ///
    /// let pending = client.post_form_url_encoded("/x", &json!({"name": "John Smith", "age": 21}))?;
    /// let outcome = pending.await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn post_form_url_encoded<T: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
    ) -> Result<BoxFuture<'_, Result<Outcome>>> {
        let body = encode_form(form)?;
        let url = url.to_string();
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(CONTENT_TYPE),
            HeaderValue::from_static(FORM_CONTENT_TYPE),
        );

        Ok(Box::pin(async move {
            self.request(Method::POST, &url, headers, Some(Bytes::from(body)))
                .await
        }))
    }

    /// Execute a prepared request
    pub async fn execute(&self, request: AjaxRequest) -> Result<Outcome> {
        self.request(request.method, &request.url, request.headers, request.body)
            .await
    }

    /// Execute multiple requests concurrently
    pub async fn execute_all(&self, requests: Vec<AjaxRequest>) -> Vec<Result<Outcome>> {
        let futures: Vec<_> = requests.into_iter().map(|r| self.execute(r)).collect();
        futures::future::join_all(futures).await
    }
}

impl std::fmt::Debug for AjaxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AjaxClient")
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .field("allow_caching", &self.allow_caching())
            .finish()
    }
}

fn json_headers(with_body: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(ACCEPT),
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    if with_body {
        headers.insert(
            HeaderName::from_static(CONTENT_TYPE),
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{ControlSignal, FnHook};
    use crate::transport::{MockTransport, RawResponse};
    use serde_json::json;

    fn client() -> (AjaxClient, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let config = AjaxConfig::new().base_url("http://localhost").unwrap();
        (AjaxClient::with_transport(config, mock.clone()), mock)
    }

    #[test]
    fn test_client_creation() {
        let client = AjaxClient::new().unwrap();
        assert!(!client.allow_caching());
        assert!(client.hooks().is_empty());
    }

    #[tokio::test]
    async fn test_default_headers() {
        let (client, mock) = client();
        client.get("/x", HeaderMap::new()).await.unwrap();

        let sent = mock.last_sent().unwrap();
        assert_eq!(sent.url.as_str(), "http://localhost/x");
        assert_eq!(sent.header("cache-control"), Some("no-cache"));
        assert_eq!(sent.header("pragma"), Some("no-cache"));
        assert_eq!(
            sent.header("if-modified-since"),
            Some("Sat, 1 Jan 2000 00:00:00 GMT")
        );
        assert_eq!(sent.header("x-requested-with"), Some("XMLHttpRequest"));
    }

    #[tokio::test]
    async fn test_allow_caching_is_shared_between_clones() {
        let (client, mock) = client();
        let clone = client.clone();
        clone.set_allow_caching(true);

        client.get("/x", HeaderMap::new()).await.unwrap();
        let sent = mock.last_sent().unwrap();
        assert!(sent.header("cache-control").is_none());
        assert!(sent.header("pragma").is_none());
        assert!(sent.header("if-modified-since").is_none());
        assert_eq!(sent.header("x-requested-with"), Some("XMLHttpRequest"));
    }

    #[tokio::test]
    async fn test_caller_cache_header_wins() {
        let (client, mock) = client();
        let mut headers = HeaderMap::new();
        headers.insert("cache-control", HeaderValue::from_static("max-age=60"));

        client.get("/x", headers).await.unwrap();
        let sent = mock.last_sent().unwrap();
        assert_eq!(sent.header("cache-control"), Some("max-age=60"));
        assert_eq!(sent.header("pragma"), Some("no-cache"));
    }

    #[tokio::test]
    async fn test_get_never_sends_body() {
        let (client, mock) = client();
        client
            .request(Method::GET, "/x", HeaderMap::new(), Some(Bytes::from("ignored")))
            .await
            .unwrap();
        client.post("/x", HeaderMap::new(), None).await.unwrap();
        client
            .put("/x", HeaderMap::new(), Some(Bytes::from("payload")))
            .await
            .unwrap();

        let sent = mock.sent();
        assert!(sent[0].body.is_none());
        assert!(sent[1].body.is_none());
        assert_eq!(sent[2].body_text().as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let (client, mock) = client();
        client.get_json("/a").await.unwrap();
        client.post_json("/a", json!({"name": "Nick"})).await.unwrap();
        client.patch_json("/a", r#"{"raw":true}"#).await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent[0].header("accept"), Some("application/json"));
        assert!(sent[0].header("content-type").is_none());
        assert_eq!(sent[1].method, Method::POST);
        assert_eq!(sent[1].header("content-type"), Some("application/json"));
        assert_eq!(sent[1].body_text().as_deref(), Some(r#"{"name":"Nick"}"#));
        assert_eq!(sent[2].method, Method::PATCH);
        assert_eq!(sent[2].body_text().as_deref(), Some(r#"{"raw":true}"#));
    }

    #[tokio::test]
    async fn test_delete_json_empty_sends_headers_only() {
        let (client, mock) = client();
        client.delete_json_empty("/items/1").await.unwrap();

        let sent = mock.last_sent().unwrap();
        assert_eq!(sent.method, Method::DELETE);
        assert_eq!(sent.header("accept"), Some("application/json"));
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn test_request_ids_increase() {
        let (client, mock) = client();
        client.get("/a", HeaderMap::new()).await.unwrap();
        client.get("/b", HeaderMap::new()).await.unwrap();

        let sent = mock.sent();
        assert!(sent[1].id > sent[0].id);
    }

    #[tokio::test]
    async fn test_pre_cancel_resolves_without_sending() {
        let (client, mock) = client();
        client.set_hooks(vec![Arc::new(
            FnHook::new("gate").pre(|_, _| Some(ControlSignal::cancel_with("offline"))),
        )]);

        let outcome = client.get("/x", HeaderMap::new()).await.unwrap();
        let cancellation = outcome.cancellation().unwrap();
        assert!(cancellation.cancelled());
        assert_eq!(cancellation.reason.as_deref(), Some("offline"));
        assert_eq!(cancellation.handle.url.path(), "/x");
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn test_post_cancel_rejects() {
        let (client, mock) = client();
        mock.push_response(RawResponse::new(200, "ok"));
        client.set_hooks(vec![Arc::new(
            FnHook::new("gate").post(|_, _| Some(ControlSignal::cancel_with("stale"))),
        )]);

        let err = client.get("/x", HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled(_)));
        assert_eq!(err.cancellation().unwrap().reason.as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn test_transport_failure_rejects() {
        let (client, mock) = client();
        mock.push_failure("connection refused");

        let err = client.get("/x", HeaderMap::new()).await.unwrap_err();
        assert!(err.is_network());
        assert!(!err.is_cancelled());
    }

    #[tokio::test]
    async fn test_relative_url_without_base_fails() {
        let client =
            AjaxClient::with_transport(AjaxConfig::default(), Arc::new(MockTransport::new()));
        let err = client.get("/x", HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }
}
