// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for xhook
//!
//! Every rejected request surfaces one of these variants. Cancellation and
//! abort carry the request handle so callers can see what was cut short.

use thiserror::Error;

use crate::http::Cancellation;
use crate::transport::RequestHandle;

/// Result type alias for xhook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xhook
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization or response decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Form body could not be url-encoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A post hook cancelled an otherwise completed request
    #[error("Request cancelled: {}", .0.reason.as_deref().unwrap_or("no reason given"))]
    Cancelled(Box<Cancellation>),

    /// The request was aborted through its handle
    #[error("Request aborted: {} {}", .0.handle.method, .0.handle.url)]
    Aborted(Box<Cancellation>),

    /// Transport-level failure reported without an underlying reqwest error
    #[error("Network error: {0}")]
    Network(String),

    /// Header name or value rejected
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a post-phase cancellation error
    pub fn cancelled(reason: Option<String>, handle: RequestHandle) -> Self {
        Error::Cancelled(Box::new(Cancellation::new(reason, handle)))
    }

    /// Create an abort error
    pub fn aborted(handle: RequestHandle) -> Self {
        Error::Aborted(Box::new(Cancellation::new(
            Some("aborted".to_string()),
            handle,
        )))
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    /// Create a new encoding error
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        Error::Encoding(msg.into())
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// True for hook cancellation and for abort
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_) | Error::Aborted(_))
    }

    /// True only for an explicit abort
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Aborted(_))
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http(_))
    }

    /// Cancellation details, if this error is a cancel or abort
    pub fn cancellation(&self) -> Option<&Cancellation> {
        match self {
            Error::Cancelled(c) | Error::Aborted(c) => Some(c),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        self.cancellation().map(|c| c.handle.url.as_str())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            match err {
                // cancel and abort pass through unchanged
                Error::Cancelled(_) | Error::Aborted(_) => err,
                other => Error::Other(format!("{}: {}", msg, other)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;

    fn handle() -> RequestHandle {
        RequestHandle::open(
            7,
            Method::POST,
            Url::parse("https://example.com/items").unwrap(),
        )
    }

    #[test]
    fn test_cancelled_error() {
        let err = Error::cancelled(Some("stale".to_string()), handle());

        assert!(err.is_cancelled());
        assert!(!err.is_aborted());
        assert_eq!(err.cancellation().unwrap().reason.as_deref(), Some("stale"));
        assert_eq!(err.url(), Some("https://example.com/items"));
        assert_eq!(err.to_string(), "Request cancelled: stale");
    }

    #[test]
    fn test_aborted_error() {
        let err = Error::aborted(handle());

        assert!(err.is_cancelled());
        assert!(err.is_aborted());
        assert!(!err.is_network());
        assert_eq!(err.cancellation().unwrap().reason.as_deref(), Some("aborted"));
    }

    #[test]
    fn test_context_preserves_cancellation() {
        let res: std::result::Result<(), Error> = Err(Error::aborted(handle()));
        assert!(res.context("loading").unwrap_err().is_aborted());

        let res: std::result::Result<(), Error> = Err(Error::network("reset"));
        let err = res.context("loading").unwrap_err();
        assert_eq!(err.to_string(), "loading: Network error: reset");
    }
}
