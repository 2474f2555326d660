// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Core hook types

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::http::Response;
use crate::transport::RequestHandle;

/// Returned by a hook to short-circuit the rest of its phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSignal {
    /// Whether to cancel. `false` behaves like returning nothing.
    pub cancel: bool,
    /// Optional human-readable reason
    pub reason: Option<String>,
}

impl ControlSignal {
    /// Cancel without a reason
    pub fn cancel() -> Self {
        Self {
            cancel: true,
            reason: None,
        }
    }

    /// Cancel with a reason
    pub fn cancel_with(reason: impl Into<String>) -> Self {
        Self {
            cancel: true,
            reason: Some(reason.into()),
        }
    }
}

/// Private key-value state of one hook for one request
#[derive(Debug, Clone, Default)]
pub struct HookState {
    values: HashMap<String, Value>,
}

impl HookState {
    /// Create empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value for `key`, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Insert a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Remove a value, returning it
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Check if a value is stored under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A request observer with optional pre-send and post-response callbacks
///
/// Both callbacks default to doing nothing, so an implementation may provide
/// only the one it needs.
///
/// # Example
///
/// ```rust
/// use xhook::hooks::{ControlSignal, Hook, HookState};
/// use xhook::transport::RequestHandle;
///
/// struct BlockAdmin;
///
/// impl Hook for BlockAdmin {
///     fn name(&self) -> &str {
///         "block-admin"
///     }
///
///     fn pre(&self, request: &mut RequestHandle, _state: &mut HookState) -> Option<ControlSignal> {
///         if request.url.path().starts_with("/admin") {
///             return Some(ControlSignal::cancel_with("admin is off limits"));
///         }
///         None
///     }
/// }
/// ```
pub trait Hook: Send + Sync {
    /// Name used in log output
    fn name(&self) -> &str {
        "hook"
    }

    /// Called before the request is sent
    fn pre(&self, request: &mut RequestHandle, state: &mut HookState) -> Option<ControlSignal> {
        let _ = (request, state);
        None
    }

    /// Called after a response arrives, whatever its status
    fn post(&self, response: &Response, state: &mut HookState) -> Option<ControlSignal> {
        let _ = (response, state);
        None
    }
}

/// Pre-send callback type
pub type PreFn =
    Box<dyn Fn(&mut RequestHandle, &mut HookState) -> Option<ControlSignal> + Send + Sync>;

/// Post-response callback type
pub type PostFn = Box<dyn Fn(&Response, &mut HookState) -> Option<ControlSignal> + Send + Sync>;

/// Hook assembled from closures
///
/// ```rust
/// use xhook::hooks::FnHook;
///
/// let hook = FnHook::new("timing")
///     .pre(|_req, state| {
///         state.insert("sent", true);
///         None
///     })
///     .post(|res, state| {
///         assert_eq!(state.get("sent"), Some(&serde_json::json!(true)));
///         let _ = res.status;
///         None
///     });
/// ```
pub struct FnHook {
    name: String,
    pre: Option<PreFn>,
    post: Option<PostFn>,
}

impl FnHook {
    /// Create a hook with neither callback defined
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pre: None,
            post: None,
        }
    }

    /// Set the pre-send callback
    pub fn pre<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut RequestHandle, &mut HookState) -> Option<ControlSignal> + Send + Sync + 'static,
    {
        self.pre = Some(Box::new(f));
        self
    }

    /// Set the post-response callback
    pub fn post<F>(mut self, f: F) -> Self
    where
        F: Fn(&Response, &mut HookState) -> Option<ControlSignal> + Send + Sync + 'static,
    {
        self.post = Some(Box::new(f));
        self
    }

    pub fn has_pre(&self) -> bool {
        self.pre.is_some()
    }

    pub fn has_post(&self) -> bool {
        self.post.is_some()
    }
}

impl fmt::Debug for FnHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook")
            .field("name", &self.name)
            .field("pre", &self.pre.is_some())
            .field("post", &self.post.is_some())
            .finish()
    }
}

impl Hook for FnHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn pre(&self, request: &mut RequestHandle, state: &mut HookState) -> Option<ControlSignal> {
        self.pre.as_ref().and_then(|f| f(request, state))
    }

    fn post(&self, response: &Response, state: &mut HookState) -> Option<ControlSignal> {
        self.post.as_ref().and_then(|f| f(response, state))
    }
}
