// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Hook registry and per-request bound hooks

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::hook::{ControlSignal, Hook, HookState};
use crate::http::Response;
use crate::transport::RequestHandle;

/// Ordered, shared list of registered hooks
///
/// Clones share the same list. Changes only affect requests started after
/// them, since every request binds its own snapshot.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Arc<RwLock<Vec<Arc<dyn Hook>>>>,
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole sequence
    pub fn set_hooks(&self, hooks: Vec<Arc<dyn Hook>>) {
        *self.hooks.write() = hooks;
    }

    /// Append to the sequence, keeping existing order
    pub fn add_hooks(&self, hooks: Vec<Arc<dyn Hook>>) {
        self.hooks.write().extend(hooks);
    }

    /// Append a single hook
    pub fn add_hook<H: Hook + 'static>(&self, hook: H) {
        self.hooks.write().push(Arc::new(hook));
    }

    /// Clear the sequence
    pub fn remove_hooks(&self) {
        self.hooks.write().clear();
    }

    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }

    /// Registered hook names in execution order
    pub fn names(&self) -> Vec<String> {
        self.hooks
            .read()
            .iter()
            .map(|h| h.name().to_string())
            .collect()
    }

    /// Snapshot the current hooks, each paired with fresh state
    pub fn bind(&self) -> BoundHooks {
        let hooks = self.hooks.read();
        BoundHooks {
            bound: hooks
                .iter()
                .map(|hook| BoundHook {
                    hook: Arc::clone(hook),
                    state: HookState::new(),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}

struct BoundHook {
    hook: Arc<dyn Hook>,
    state: HookState,
}

/// Hooks bound to one request, each with its own state
pub struct BoundHooks {
    bound: Vec<BoundHook>,
}

impl BoundHooks {
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// State of the hook at `index`
    pub fn state(&self, index: usize) -> Option<&HookState> {
        self.bound.get(index).map(|b| &b.state)
    }

    /// Run every `pre` in order; stops at the first cancel and returns it
    pub fn run_pre(&mut self, request: &mut RequestHandle) -> Option<ControlSignal> {
        for bound in &mut self.bound {
            match bound.hook.pre(request, &mut bound.state) {
                Some(signal) if signal.cancel => {
                    tracing::debug!(
                        request_id = request.id(),
                        hook = bound.hook.name(),
                        reason = ?signal.reason,
                        "Pre hook cancelled request"
                    );
                    return Some(signal);
                }
                _ => {}
            }
        }
        None
    }

    /// Run every `post` in order; stops at the first cancel and returns it
    pub fn run_post(&mut self, response: &Response) -> Option<ControlSignal> {
        for bound in &mut self.bound {
            match bound.hook.post(response, &mut bound.state) {
                Some(signal) if signal.cancel => {
                    tracing::debug!(
                        request_id = response.handle.id(),
                        hook = bound.hook.name(),
                        reason = ?signal.reason,
                        "Post hook cancelled request"
                    );
                    return Some(signal);
                }
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::FnHook;
    use crate::transport::RawResponse;
    use parking_lot::Mutex;
    use reqwest::Method;
    use url::Url;

    fn handle() -> RequestHandle {
        RequestHandle::open(9, Method::GET, Url::parse("https://example.com/").unwrap())
    }

    fn response() -> Response {
        Response::from_raw(RawResponse::new(200, "ok"), handle())
    }

    fn recording(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Hook> {
        let pre_log = Arc::clone(log);
        let post_log = Arc::clone(log);
        let pre_name = format!("{}.pre", name);
        let post_name = format!("{}.post", name);
        Arc::new(
            FnHook::new(name)
                .pre(move |_, _| {
                    pre_log.lock().push(pre_name.clone());
                    None
                })
                .post(move |_, _| {
                    post_log.lock().push(post_name.clone());
                    None
                }),
        )
    }

    #[test]
    fn test_set_add_remove() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HookRegistry::new();

        registry.add_hooks(vec![recording("a", &log)]);
        registry.add_hooks(vec![recording("b", &log), recording("c", &log)]);
        assert_eq!(registry.names(), vec!["a", "b", "c"]);

        registry.set_hooks(vec![recording("z", &log)]);
        assert_eq!(registry.names(), vec!["z"]);

        registry.remove_hooks();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_phases_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HookRegistry::new();
        registry.set_hooks(vec![
            recording("a", &log),
            recording("b", &log),
            recording("c", &log),
        ]);

        let mut bound = registry.bind();
        assert!(bound.run_pre(&mut handle()).is_none());
        assert!(bound.run_post(&response()).is_none());

        assert_eq!(
            *log.lock(),
            vec!["a.pre", "b.pre", "c.pre", "a.post", "b.post", "c.post"]
        );
    }

    #[test]
    fn test_cancel_stops_phase() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HookRegistry::new();
        registry.add_hooks(vec![recording("a", &log)]);
        registry.add_hook(FnHook::new("gate").pre(|_, _| Some(ControlSignal::cancel_with("x"))));
        registry.add_hooks(vec![recording("c", &log)]);

        let signal = registry.bind().run_pre(&mut handle()).unwrap();
        assert_eq!(signal.reason.as_deref(), Some("x"));
        assert_eq!(*log.lock(), vec!["a.pre"]);
    }

    #[test]
    fn test_non_cancelling_signal_is_ignored() {
        let registry = HookRegistry::new();
        registry.add_hook(FnHook::new("noop").post(|_, _| Some(ControlSignal::default())));
        assert!(registry.bind().run_post(&response()).is_none());
    }

    #[test]
    fn test_state_is_per_hook_and_per_bind() {
        let registry = HookRegistry::new();
        registry.add_hook(FnHook::new("writer").pre(|_, state| {
            state.insert("info", "v");
            None
        }));
        registry.add_hook(FnHook::new("reader"));

        let mut first = registry.bind();
        first.run_pre(&mut handle());
        assert_eq!(first.state(0).unwrap().get_str("info"), Some("v"));
        assert!(first.state(1).unwrap().is_empty());

        let second = registry.bind();
        assert!(second.state(0).unwrap().is_empty());
    }

    #[test]
    fn test_bind_is_a_snapshot() {
        let registry = HookRegistry::new();
        registry.add_hook(FnHook::new("a"));
        let bound = registry.bind();

        registry.add_hook(FnHook::new("b"));
        assert_eq!(bound.len(), 1);
        assert_eq!(registry.bind().len(), 2);
    }
}
