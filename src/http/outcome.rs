// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request outcomes

use super::response::Response;
use crate::transport::RequestHandle;

/// Description of a cancelled or aborted request
#[derive(Debug, Clone)]
pub struct Cancellation {
    /// Reason given by the hook, or `"aborted"` for an abort
    pub reason: Option<String>,
    /// The request that was cancelled
    pub handle: RequestHandle,
}

impl Cancellation {
    pub fn new(reason: Option<String>, handle: RequestHandle) -> Self {
        Self { reason, handle }
    }

    /// Always true; mirrors the `cancelled` flag callers check for
    pub fn cancelled(&self) -> bool {
        true
    }
}

/// A settled request that did not fail
///
/// Cancelling in a pre hook is a normal result, not an error, so it is
/// reported here rather than through [`Error`](crate::Error).
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A response arrived and no post hook cancelled it. Any status code.
    Completed(Response),
    /// A pre hook cancelled the request before it was sent
    Cancelled(Cancellation),
}

impl Outcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled(_))
    }

    /// The response, if the request completed
    pub fn response(&self) -> Option<&Response> {
        match self {
            Outcome::Completed(response) => Some(response),
            Outcome::Cancelled(_) => None,
        }
    }

    /// The cancellation, if a pre hook cancelled
    pub fn cancellation(&self) -> Option<&Cancellation> {
        match self {
            Outcome::Cancelled(cancellation) => Some(cancellation),
            Outcome::Completed(_) => None,
        }
    }

    /// Take the response, if the request completed
    pub fn into_response(self) -> Option<Response> {
        match self {
            Outcome::Completed(response) => Some(response),
            Outcome::Cancelled(_) => None,
        }
    }
}
