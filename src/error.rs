//! Error types used by the actor group and its actors.
//!
//! Everything the group reports is an [`ActorError`]: failures returned by actor
//! bodies, synthetic failures produced when a predecessor did not start,
//! external termination requests, and wait/listener failures.
//!
//! The type is `Clone` because a single start outcome may be observed by
//! several waiters.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by actors and the group runtime.
///
/// The first actor to exit decides the error returned by
/// [`Group::run`](crate::Group::run); later errors raised during shutdown are discarded.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActorError {
    /// Actor body returned an error.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The predecessor's start signal completed with a failure, so this actor never ran.
    #[error("error starting previous group item: {source}")]
    PreviousFailed {
        /// Failure reported by the predecessor's start signal.
        #[source]
        source: Box<ActorError>,
    },

    /// The process was asked to terminate from outside (OS signal or equivalent).
    #[error("received signal {signal}")]
    Terminated {
        /// Name of the signal that was observed, e.g. `SIGTERM`.
        signal: String,
    },

    /// Termination listeners could not be installed.
    #[error("signal listener failed: {error}")]
    Signal {
        /// The underlying I/O error message.
        error: String,
    },

    /// Waiting on a start signal was cancelled through its token.
    #[error("wait cancelled")]
    Canceled,

    /// Waiting on a start signal exceeded its deadline.
    #[error("wait timed out after {timeout:?}")]
    Timeout {
        /// The deadline that elapsed.
        timeout: Duration,
    },

    /// The task driving an actor panicked.
    #[error("actor {actor} panicked: {info}")]
    Panicked {
        /// Name of the actor whose task panicked.
        actor: String,
        /// Panic payload, when it was a string.
        info: String,
    },

    /// The actor returned `Ok(())` without ever reporting its start outcome.
    #[error("actor {actor} exited before reporting its start")]
    ExitedBeforeStart {
        /// Name of the actor that exited.
        actor: String,
    },
}

impl ActorError {
    /// Shorthand for [`ActorError::Fail`].
    ///
    /// # Example
    /// ```
    /// use rungroup::ActorError;
    ///
    /// let err = ActorError::fail("connection refused");
    /// assert_eq!(err.to_string(), "execution failed: connection refused");
    /// ```
    pub fn fail(error: impl ToString) -> Self {
        ActorError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActorError::Fail { .. } => "actor_failed",
            ActorError::PreviousFailed { .. } => "actor_previous_failed",
            ActorError::Terminated { .. } => "actor_terminated",
            ActorError::Signal { .. } => "actor_signal",
            ActorError::Canceled => "actor_canceled",
            ActorError::Timeout { .. } => "actor_timeout",
            ActorError::Panicked { .. } => "actor_panicked",
            ActorError::ExitedBeforeStart { .. } => "actor_exited_before_start",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActorError::Fail { error } => format!("error: {error}"),
            ActorError::PreviousFailed { source } => {
                format!("previous actor failed to start: {}", source.as_message())
            }
            ActorError::Terminated { signal } => format!("terminated by {signal}"),
            ActorError::Signal { error } => format!("signal: {error}"),
            ActorError::Canceled => "wait cancelled".to_string(),
            ActorError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            ActorError::Panicked { actor, info } => format!("panic in {actor}: {info}"),
            ActorError::ExitedBeforeStart { actor } => {
                format!("{actor} exited without reporting start")
            }
        }
    }

    /// Walks through [`ActorError::PreviousFailed`] wrappers and returns the
    /// error that started the chain of failures.
    ///
    /// # Example
    /// ```
    /// use rungroup::ActorError;
    ///
    /// let root = ActorError::fail("boom");
    /// let wrapped = ActorError::PreviousFailed {
    ///     source: Box::new(ActorError::PreviousFailed { source: Box::new(root.clone()) }),
    /// };
    /// assert_eq!(wrapped.root_cause(), &root);
    /// ```
    pub fn root_cause(&self) -> &ActorError {
        let mut cur = self;
        while let ActorError::PreviousFailed { source } = cur {
            cur = source.as_ref();
        }
        cur
    }

    /// Returns `true` if `self` is `cause` or wraps it at any depth.
    pub fn is_caused_by(&self, cause: &ActorError) -> bool {
        let mut cur = self;
        loop {
            if cur == cause {
                return true;
            }
            match cur {
                ActorError::PreviousFailed { source } => cur = source.as_ref(),
                _ => return false,
            }
        }
    }

    /// Indicates whether the error represents a clean external shutdown.
    pub fn is_termination(&self) -> bool {
        matches!(self, ActorError::Terminated { .. })
    }
}
