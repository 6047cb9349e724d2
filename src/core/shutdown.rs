//! # Cross-platform OS signal handling.
//!
//! Provides [`OsSignals`], the default [`TerminationSource`] used by
//! [`Group::run_with_termination`](crate::Group::run_with_termination).
//!
//! ## Signals
//! **Unix platforms:** every signal listed in [`Config::signals`](crate::Config::signals).
//!
//! **Other platforms:** `Ctrl-C` via [`tokio::signal::ctrl_c`], reported as `SIGINT`,
//! whenever the list is non-empty.

use async_trait::async_trait;

use crate::config::TerminationSignal;
use crate::error::ActorError;

/// Something that completes when the process is asked to stop.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use rungroup::{ActorError, TerminationSource};
///
/// struct Never;
///
/// #[async_trait]
/// impl TerminationSource for Never {
///     async fn terminated(&self) -> Result<String, ActorError> {
///         std::future::pending().await
///     }
/// }
/// ```
#[async_trait]
pub trait TerminationSource: Send + Sync + 'static {
    /// Waits for a termination request.
    ///
    /// Returns the name of the observed request (e.g. `SIGTERM`), or an error
    /// if the source could not be installed.
    async fn terminated(&self) -> Result<String, ActorError>;
}

/// Listens for OS termination signals.
///
/// Each call to [`terminated`](TerminationSource::terminated) creates
/// independent signal listeners.
#[derive(Clone, Debug)]
pub struct OsSignals {
    signals: Vec<TerminationSignal>,
}

impl OsSignals {
    /// Listens for the given signals.
    pub fn new(signals: Vec<TerminationSignal>) -> Self {
        Self { signals }
    }

    /// Returns the signals this source listens for.
    pub fn signals(&self) -> &[TerminationSignal] {
        &self.signals
    }
}

#[async_trait]
impl TerminationSource for OsSignals {
    #[cfg(unix)]
    async fn terminated(&self) -> Result<String, ActorError> {
        use futures::future::select_all;
        use tokio::signal::unix::{SignalKind, signal};

        if self.signals.is_empty() {
            return std::future::pending().await;
        }

        let mut listeners = Vec::with_capacity(self.signals.len());
        for s in &self.signals {
            let kind = match s {
                TerminationSignal::Interrupt => SignalKind::interrupt(),
                TerminationSignal::Terminate => SignalKind::terminate(),
                TerminationSignal::Quit => SignalKind::quit(),
                TerminationSignal::Hangup => SignalKind::hangup(),
            };
            let stream = signal(kind).map_err(|e| ActorError::Signal {
                error: e.to_string(),
            })?;
            listeners.push((*s, stream));
        }

        let waits = listeners.iter_mut().map(|(s, stream)| {
            let s = *s;
            Box::pin(async move {
                stream.recv().await;
                s
            })
        });
        let (received, _, _) = select_all(waits).await;
        Ok(received.as_str().to_string())
    }

    #[cfg(not(unix))]
    async fn terminated(&self) -> Result<String, ActorError> {
        if self.signals.is_empty() {
            return std::future::pending().await;
        }
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| ActorError::Signal {
                error: e.to_string(),
            })?;
        Ok(TerminationSignal::Interrupt.as_str().to_string())
    }
}
