// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request description used for batches and the builder API

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

use super::body::{encode_form, JsonBody};
use super::headers::{ACCEPT, CONTENT_TYPE};
use super::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
use crate::error::{Error, Result};

/// A request that has not been issued yet
///
/// The URL is kept as given and resolved against the client's base URL when
/// the request runs.
#[derive(Debug, Clone)]
pub struct AjaxRequest {
    /// Request method
    pub method: Method,
    /// Request URL, absolute or relative
    pub url: String,
    /// Caller headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
}

impl AjaxRequest {
    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Create a new GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Create a new PUT request
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Create a new PATCH request
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    /// Create a new DELETE request
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        let header_name = HeaderName::try_from(name).map_err(|e| Error::invalid_header(name, e))?;
        let header_value =
            HeaderValue::try_from(value.as_ref()).map_err(|e| Error::invalid_header(name, e))?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Result<Self> {
        for (name, value) in headers {
            self = self.header(name, value)?;
        }
        Ok(self)
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body with JSON `Accept` and `Content-Type`
    pub fn json(mut self, body: impl Into<JsonBody>) -> Result<Self> {
        self.body = Some(Bytes::from(body.into().into_text()?));
        self.header(ACCEPT, JSON_CONTENT_TYPE)?
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
    }

    /// Set a url-encoded form body from a flat object
    pub fn form<T: serde::Serialize + ?Sized>(mut self, form: &T) -> Result<Self> {
        self.body = Some(Bytes::from(encode_form(form)?));
        self.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
    }
}
