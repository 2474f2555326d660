// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # xhook - AJAX helper with a hook pipeline
//!
//! A small request library in the spirit of the browser's XMLHttpRequest
//! helpers: one call issues one request, and every request runs through an
//! ordered list of hooks that can observe, adjust or cancel it.
//!
//! ## Features
//!
//! - Verbs: `get`, `post`, `put`, `patch`, `delete`, plus JSON variants
//! - Url-encoded form posts from flat objects
//! - Ordered pre/post hooks with private per-request state
//! - Pre-send cancellation resolves; post-response cancellation rejects
//! - Cache-busting headers unless caching is allowed
//! - Pluggable transport: reqwest over HTTP, or an in-memory mock
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xhook::hooks::{ControlSignal, FnHook};
//! use xhook::{AjaxClient, AjaxConfig, Outcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AjaxClient::with_config(AjaxConfig::new().base_url("https://example.com")?)?;
//!
//!     client.set_hooks(vec![Arc::new(
//!         FnHook::new("audit")
//!             .pre(|req, state| {
//!                 state.insert("path", req.url.path());
//!                 None
//!             })
//!             .post(|res, state| {
//!                 if res.status == 401 {
//!                     return Some(ControlSignal::cancel_with("login required"));
//!                 }
//!                 println!("{} -> {}", state.get_str("path").unwrap_or("?"), res.status);
//!                 None
//!             }),
//!     )]);
//!
//!     match client.get_json("/api/user").await? {
//!         Outcome::Completed(res) => println!("user: {:?}", res.json),
//!         Outcome::Cancelled(c) => println!("not sent: {:?}", c.reason),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod hooks;
pub mod http;
pub mod transport;

// Re-exports for convenience

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{
    encode_form, parse_header_blob, AjaxClient, AjaxConfig, AjaxRequest, Cancellation, JsonBody,
    Outcome, Response,
};

// Hooks
pub use hooks::{ControlSignal, FnHook, Hook, HookRegistry, HookState};

// Transport
pub use transport::{
    AbortHandle, HttpTransport, MockTransport, RawResponse, RequestHandle, Transport,
};

/// xhook version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
