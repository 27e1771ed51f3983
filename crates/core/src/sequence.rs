//! # Request Sequencing
//!
//! Snapshot fetches may overlap: a refresh after a booking can start while the
//! initial load is still in flight. Every fetch takes a [`RequestToken`] when it
//! starts, and its result is applied only if no newer fetch has been applied
//! already. A slow, older response therefore never overwrites a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Position of a fetch in issue order. Larger tokens were issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the token for a fetch that is about to start.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Claims the right to apply the result of `token`.
    ///
    /// Returns `false` when a result from the same or a newer token was
    /// already applied; the caller must then drop its result.
    pub fn try_apply(&self, token: RequestToken) -> bool {
        self.applied
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |applied| {
                (token.0 > applied).then_some(token.0)
            })
            .is_ok()
    }

    /// Token of the last applied result, if any.
    pub fn last_applied(&self) -> Option<RequestToken> {
        match self.applied.load(Ordering::SeqCst) {
            0 => None,
            value => Some(RequestToken(value)),
        }
    }
}
