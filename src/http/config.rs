// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use url::Url;

use super::{DEFAULT_REQUESTED_WITH, DEFAULT_USER_AGENT};
use crate::error::Result;

/// Seconds since the epoch for 2000-01-01T00:00:00Z
const FAR_PAST_SECS: i64 = 946_684_800;

/// Client configuration
#[derive(Debug, Clone)]
pub struct AjaxConfig {
    /// Leave browser-style caching alone. When false, no-cache headers are
    /// added to every request that does not set them itself.
    pub allow_caching: bool,
    /// Base for relative request URLs
    pub base_url: Option<Url>,
    /// Value of the `X-Requested-With` header
    pub requested_with: String,
    /// Date sent as `If-Modified-Since` when caching is disabled
    pub if_modified_since: DateTime<Utc>,
    /// User agent string for the HTTP transport
    pub user_agent: String,
    /// Request timeout for the HTTP transport (none by default)
    pub timeout: Option<Duration>,
    /// Maximum redirects the HTTP transport follows
    pub max_redirects: usize,
}

impl Default for AjaxConfig {
    fn default() -> Self {
        Self {
            allow_caching: false,
            base_url: None,
            requested_with: DEFAULT_REQUESTED_WITH.to_string(),
            if_modified_since: Utc
                .timestamp_opt(FAR_PAST_SECS, 0)
                .single()
                .unwrap_or_default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_redirects: 10,
        }
    }
}

impl AjaxConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow or suppress caching headers
    pub fn allow_caching(mut self, allow: bool) -> Self {
        self.allow_caching = allow;
        self
    }

    /// Set the base URL for relative request URLs
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Set the `X-Requested-With` value
    pub fn requested_with(mut self, value: impl Into<String>) -> Self {
        self.requested_with = value.into();
        self
    }

    /// Set the `If-Modified-Since` date used to defeat caches
    pub fn if_modified_since(mut self, date: DateTime<Utc>) -> Self {
        self.if_modified_since = date;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// `If-Modified-Since` rendered as an HTTP date, e.g. `Sat, 1 Jan 2000 00:00:00 GMT`
    pub fn if_modified_since_header(&self) -> String {
        self.if_modified_since
            .format("%a, %-d %b %Y %H:%M:%S GMT")
            .to_string()
    }

    /// Resolve a request URL against the base URL
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => Ok(base.join(url)?),
                None => Err(url::ParseError::RelativeUrlWithoutBase.into()),
            },
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = AjaxConfig::default();
        assert!(!config.allow_caching);
        assert_eq!(config.requested_with, "XMLHttpRequest");
        assert!(config.timeout.is_none());
        assert_eq!(
            config.if_modified_since_header(),
            "Sat, 1 Jan 2000 00:00:00 GMT"
        );
    }

    #[test]
    fn test_resolve_url() {
        let config = AjaxConfig::new().base_url("http://localhost:8080/app/").unwrap();
        assert_eq!(
            config.resolve_url("/x").unwrap().as_str(),
            "http://localhost:8080/x"
        );
        assert_eq!(
            config.resolve_url("items?id=1").unwrap().as_str(),
            "http://localhost:8080/app/items?id=1"
        );
        assert_eq!(
            config.resolve_url("https://example.com/y").unwrap().as_str(),
            "https://example.com/y"
        );
    }

    #[test]
    fn test_relative_url_without_base() {
        let err = AjaxConfig::default().resolve_url("/x").unwrap_err();
        assert!(matches!(err, Error::Url(url::ParseError::RelativeUrlWithoutBase)));
    }
}
