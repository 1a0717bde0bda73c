//! Cancellable timer registry.
//!
//! Every timer the session uses (splash delay, Home rotation, scan-stage
//! dwell) is armed through this registry, one slot per kind. Arming a slot
//! cancels whatever was in it, and dropping the registry cancels everything,
//! so no timer can outlive its owner and fire against stale state.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

/// The timer slots the session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Splash,
    Rotation,
    ScanStage,
}

/// One cancellation token per [`TimerKind`].
#[derive(Debug, Default)]
pub struct TimerRegistry {
    tokens: Mutex<HashMap<TimerKind, CancellationToken>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any timer currently in the slot and returns a fresh token
    /// for the new one.
    pub fn arm(&self, kind: TimerKind) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = self
            .tokens
            .lock()
            .expect("timer registry poisoned")
            .insert(kind, token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }

    /// Cancels the timer in the slot, if any.
    pub fn cancel(&self, kind: TimerKind) {
        if let Some(token) = self
            .tokens
            .lock()
            .expect("timer registry poisoned")
            .remove(&kind)
        {
            token.cancel();
        }
    }

    /// Cancels every armed timer.
    pub fn cancel_all(&self) {
        let tokens: Vec<_> = self
            .tokens
            .lock()
            .expect("timer registry poisoned")
            .drain()
            .collect();
        for (_, token) in tokens {
            token.cancel();
        }
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
