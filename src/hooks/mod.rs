// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Ordered pre/post hook pipeline
//!
//! Every registered [`Hook`] may observe a request just before it is sent
//! (`pre`) and the normalized response once it arrives (`post`). Hooks run in
//! registration order in both phases. Each hook gets its own [`HookState`]
//! per request, shared between its `pre` and `post` and invisible to every
//! other hook and every other request.
//!
//! Returning a cancelling [`ControlSignal`] stops the phase:
//!
//! - in `pre`, nothing is sent and the request resolves as cancelled;
//! - in `post`, the request fails with [`Error::Cancelled`](crate::Error::Cancelled).

mod builtin;
mod hook;
mod registry;

pub use builtin::{HeaderInjector, RequestLogger};
pub use hook::{ControlSignal, FnHook, Hook, HookState, PostFn, PreFn};
pub use registry::{BoundHooks, HookRegistry};
