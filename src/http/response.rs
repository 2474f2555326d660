// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Normalized response object

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::headers::CONTENT_TYPE;
use super::JSON_CONTENT_TYPE;
use crate::error::Result;
use crate::transport::{RawResponse, RequestHandle};

/// Caller-facing view of a completed exchange
#[derive(Debug, Clone)]
pub struct Response {
    /// Raw body bytes
    pub body: Bytes,
    /// Body as text, lossy conversion
    pub text: String,
    /// Parsed body, present only for non-empty `application/json` responses
    /// whose body parses
    pub json: Option<Value>,
    /// Status code
    pub status: u16,
    /// Status text
    pub status_text: String,
    /// Response headers, keyed as the transport reported them
    pub headers: HashMap<String, String>,
    /// Final URL after redirects
    pub url: Url,
    /// The request this response answers
    pub handle: RequestHandle,
}

impl Response {
    /// Normalize a raw transport response.
    ///
    /// A JSON-typed body that does not parse leaves `json` empty; the text is
    /// still available.
    pub fn from_raw(raw: RawResponse, handle: RequestHandle) -> Self {
        let headers = parse_header_blob(&raw.headers);
        let text = String::from_utf8_lossy(&raw.body).into_owned();

        let is_json = header_lookup(&headers, CONTENT_TYPE)
            .map(|ct| ct.contains(JSON_CONTENT_TYPE))
            .unwrap_or(false);
        let json = if is_json && !text.is_empty() {
            match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(
                        request_id = handle.id(),
                        status = raw.status,
                        error = %e,
                        "JSON response body did not parse"
                    );
                    None
                }
            }
        } else {
            None
        };

        let url = raw.url.unwrap_or_else(|| handle.url.clone());

        Self {
            body: raw.body,
            text,
            json,
            status: raw.status,
            status_text: raw.status_text,
            headers,
            url,
            handle,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Check if status is client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if status is server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Get a header value: exact key first, then ASCII case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        header_lookup(&self.headers, name)
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Deserialize the body into a typed value
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.json {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(serde_json::from_slice(&self.body)?),
        }
    }
}

fn header_lookup<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(String::as_str)
}

/// Parse a raw header blob into a map
///
/// Lines are separated by CRLF and split on the first `": "`; the rest of the
/// line is the value even if it contains another separator. Blank lines and
/// lines without a name are skipped. A repeated name keeps the last value.
pub fn parse_header_blob(blob: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in blob.split("\r\n") {
        if line.is_empty() {
            continue;
        }

        match line.find(": ") {
            Some(idx) if idx > 0 => {
                headers.insert(line[..idx].to_string(), line[idx + 2..].to_string());
            }
            _ => {}
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde::Deserialize;
    use serde_json::json;
    use url::Url;

    fn handle() -> RequestHandle {
        RequestHandle::open(1, Method::GET, Url::parse("https://example.com").unwrap())
    }

    #[test]
    fn test_parse_header_blob() {
        let headers = parse_header_blob(
            "Content-Type: text/html\r\nX-Note: a: b: c\r\n\r\nbroken line\r\n: nameless\r\n",
        );
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["Content-Type"], "text/html");
        assert_eq!(headers["X-Note"], "a: b: c");
    }

    #[test]
    fn test_parse_header_blob_is_case_sensitive() {
        let headers = parse_header_blob("etag: 1\r\nETag: 2\r\netag: 3");
        assert_eq!(headers["etag"], "3");
        assert_eq!(headers["ETag"], "2");
        assert!(parse_header_blob("").is_empty());
    }

    #[test]
    fn test_json_body_parsed() {
        let resp =
            Response::from_raw(RawResponse::json(200, r#"{"name":"Nick"}"#), handle());
        assert_eq!(resp.json, Some(json!({"name": "Nick"})));
        assert_eq!(resp.content_type(), Some("application/json"));
    }

    #[test]
    fn test_json_charset_and_error_status() {
        let raw = RawResponse::new(422, r#"{"error":"bad"}"#)
            .header("content-type", "application/json; charset=utf-8");
        let resp = Response::from_raw(raw, handle());
        assert_eq!(resp.json, Some(json!({"error": "bad"})));
        assert!(resp.is_client_error());
    }

    #[test]
    fn test_non_json_not_parsed() {
        let raw = RawResponse::new(200, r#"{"name":"Nick"}"#).header("Content-Type", "text/plain");
        let resp = Response::from_raw(raw, handle());
        assert!(resp.json.is_none());
        assert_eq!(resp.text, r#"{"name":"Nick"}"#);
    }

    #[test]
    fn test_empty_json_body_skipped() {
        let resp = Response::from_raw(RawResponse::json(204, ""), handle());
        assert!(resp.json.is_none());
        assert_eq!(resp.status_text, "No Content");
    }

    #[test]
    fn test_malformed_json_keeps_text() {
        let resp = Response::from_raw(RawResponse::json(200, "{nope"), handle());
        assert!(resp.json.is_none());
        assert_eq!(resp.text, "{nope");

        let resp = Response::from_raw(RawResponse::json(503, "Service Unavailable"), handle());
        assert!(resp.json.is_none());
        assert!(resp.is_server_error());
        assert!(resp.deserialize::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_final_url() {
        let resp = Response::from_raw(RawResponse::new(200, ""), handle());
        assert_eq!(resp.url.as_str(), "https://example.com/");

        let moved = Url::parse("https://example.com/landing").unwrap();
        let resp = Response::from_raw(RawResponse::new(200, "").url(moved.clone()), handle());
        assert_eq!(resp.url, moved);
        assert_eq!(resp.handle.url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_headers_always_present() {
        let resp = Response::from_raw(RawResponse::new(500, "boom"), handle());
        assert!(resp.headers.is_empty());
        assert!(resp.is_server_error());
        assert!(resp.content_type().is_none());
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct User {
            name: String,
        }

        let resp =
            Response::from_raw(RawResponse::json(200, r#"{"name":"Nick"}"#), handle());
        assert_eq!(resp.deserialize::<User>().unwrap().name, "Nick");

        let raw = RawResponse::new(200, r#"{"name":"Ann"}"#).header("Content-Type", "text/plain");
        let resp = Response::from_raw(raw, handle());
        assert_eq!(resp.deserialize::<User>().unwrap().name, "Ann");
    }
}
