//! Cooperative cancellation flag shared between requester and executor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Single-flag cancellation signal.
///
/// Clones share the same flag. Signalling is idempotent and never acts
/// synchronously: the executor observes the flag at the head of the next tick
/// of the owning action.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    requested: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    ///
    /// Returns `true` if this call raised the flag, `false` if it was already
    /// raised. Either way the token ends up cancelled.
    pub fn cancel(&self) -> bool {
        !self.requested.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
