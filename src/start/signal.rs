//! # Start signal: settle-once startup handoff between actors.
//!
//! A [`StartSignal`] announces that an actor finished starting, either
//! successfully or with an [`ActorError`]. Dependent actors wait on it before
//! running their own body.
//!
//! ## Rules
//! - The outcome is published **once**; later completions are ignored and logged.
//! - Reading the outcome never consumes it: every waiter sees the same value.
//! - The post-start hook runs **before** success is published, on the completing task.
//! - The hook is fixed when the signal is created and runs at most once.
//!
//! ```text
//! success() ──► after_start() ──► publish Ok(())  ──► waiters wake
//! fail(e)   ─────────────────────► publish Err(e) ──► waiters wake
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::{sync::watch, time};
use tokio_util::sync::CancellationToken;

use crate::error::ActorError;

/// Result published by a start signal.
pub type StartOutcome = Result<(), ActorError>;

/// Post-start hook attached to a signal.
pub(crate) type AfterStart = Box<dyn FnOnce() + Send + 'static>;

struct Inner {
    slot: watch::Sender<Option<StartOutcome>>,
    after_start: Mutex<Option<AfterStart>>,
}

/// Settle-once handoff carrying an actor's startup outcome.
///
/// Cloning is cheap and yields a handle to the same signal.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use rungroup::StartSignal;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let hooked = Arc::new(AtomicBool::new(false));
/// let flag = hooked.clone();
/// let signal = StartSignal::with_after_start(move || flag.store(true, Ordering::SeqCst));
///
/// signal.success();
/// assert!(signal.wait().await.is_ok());
/// assert!(hooked.load(Ordering::SeqCst));
/// # }
/// ```
#[derive(Clone)]
pub struct StartSignal {
    inner: Arc<Inner>,
}

impl StartSignal {
    /// Creates a pending signal without a post-start hook.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Creates a pending signal whose `f` runs once, right before success is published.
    pub fn with_after_start<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::build(Some(Box::new(f)))
    }

    fn build(after_start: Option<AfterStart>) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: watch::Sender::new(None),
                after_start: Mutex::new(after_start),
            }),
        }
    }

    /// Reports a successful start.
    ///
    /// Runs the post-start hook (if any) synchronously, then wakes the waiters.
    pub fn success(&self) {
        if self.is_completed() {
            tracing::warn!("start signal already completed; ignoring success");
            return;
        }
        let hook = self
            .inner
            .after_start
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(hook) = hook {
            hook();
        }
        self.publish(Ok(()));
    }

    /// Reports a failed start. The post-start hook is never run.
    pub fn fail(&self, err: ActorError) {
        self.publish(Err(err));
    }

    /// Waits until the outcome is published and returns it.
    pub async fn wait(&self) -> StartOutcome {
        let mut rx = self.inner.slot.subscribe();
        match rx.wait_for(Option::is_some).await {
            Ok(slot) => match &*slot {
                Some(outcome) => outcome.clone(),
                None => Err(ActorError::Canceled),
            },
            // The sender lives in `inner`, which `self` keeps alive.
            Err(_closed) => Err(ActorError::Canceled),
        }
    }

    /// Like [`wait`](Self::wait), but gives up with [`ActorError::Canceled`]
    /// once `token` is cancelled. The outcome stays available to later waiters.
    pub async fn wait_with_token(&self, token: &CancellationToken) -> StartOutcome {
        tokio::select! {
            biased;
            res = self.wait() => res,
            _ = token.cancelled() => Err(ActorError::Canceled),
        }
    }

    /// Like [`wait`](Self::wait), but gives up with [`ActorError::Timeout`] after `timeout`.
    pub async fn wait_timeout(&self, timeout: Duration) -> StartOutcome {
        match time::timeout(timeout, self.wait()).await {
            Ok(res) => res,
            Err(_elapsed) => Err(ActorError::Timeout { timeout }),
        }
    }

    /// Returns the published outcome, or `None` while the signal is pending.
    pub fn outcome(&self) -> Option<StartOutcome> {
        self.inner.slot.borrow().clone()
    }

    /// Returns `true` once success or failure has been published.
    pub fn is_completed(&self) -> bool {
        self.inner.slot.borrow().is_some()
    }

    fn publish(&self, outcome: StartOutcome) {
        let published = self.inner.slot.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(outcome);
            true
        });
        if !published {
            tracing::warn!("start signal already completed; ignoring second outcome");
        }
    }
}

impl Default for StartSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StartSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartSignal")
            .field("outcome", &self.outcome())
            .finish_non_exhaustive()
    }
}
