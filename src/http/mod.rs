// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request executor and response normalization
//!
//! [`AjaxClient`] turns a verb call into one transport request, runs the
//! hook pipeline around it and hands back an [`Outcome`].

mod body;
mod client;
mod config;
mod outcome;
mod request;
mod response;

pub use body::{encode_form, JsonBody};
pub use client::AjaxClient;
pub use config::AjaxConfig;
pub use outcome::{Cancellation, Outcome};
pub use request::AjaxRequest;
pub use response::{parse_header_blob, Response};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("xhook/", env!("CARGO_PKG_VERSION"));

/// Value of the `X-Requested-With` marker header
pub const DEFAULT_REQUESTED_WITH: &str = "XMLHttpRequest";

/// Content type used for JSON bodies
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type used for url-encoded form bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CACHE_CONTROL: &str = "cache-control";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const IF_MODIFIED_SINCE: &str = "if-modified-since";
    pub const PRAGMA: &str = "pragma";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";
}
