//! # Actor specification.
//!
//! [`ActorSpec`] bundles everything the group needs to run one actor:
//! - the execution function (receives the actor's own [`StartSignal`])
//! - the interrupt function (receives the group's terminating error)
//! - an optional predecessor signal gating the start
//! - an optional post-start hook attached to the actor's own signal
//! - an optional display name used in logs and panic reports
//!
//! Register it with [`Group::add_spec`](crate::Group::add_spec).
//!
//! ## Example
//! ```rust
//! use rungroup::{ActorError, ActorSpec, Group, StartSignal};
//!
//! let mut group = Group::default();
//! let db = group.add_spec(
//!     ActorSpec::new(
//!         |started: StartSignal| async move {
//!             started.success();
//!             Ok::<(), ActorError>(())
//!         },
//!         |_err: Option<&ActorError>| {},
//!     )
//!     .named("db"),
//! );
//!
//! group.add_spec(
//!     ActorSpec::new(
//!         |_started: StartSignal| async { Ok::<(), ActorError>(()) },
//!         |_err: Option<&ActorError>| {},
//!     )
//!     .named("http")
//!     .after(&db)
//!     .after_start(|| println!("http is up")),
//! );
//! assert_eq!(group.len(), 2);
//! ```

use std::borrow::Cow;
use std::future::Future;

use futures::future::BoxFuture;

use crate::error::ActorError;
use crate::start::{AfterStart, StartSignal};

/// Boxed future returned by an actor's execution function.
pub type ActorFuture = BoxFuture<'static, Result<(), ActorError>>;

pub(crate) type Execute = Box<dyn FnOnce(StartSignal) -> ActorFuture + Send + 'static>;
pub(crate) type Interrupt = Box<dyn for<'a> FnOnce(Option<&'a ActorError>) + Send + 'static>;

/// Description of one actor before it is registered with a group.
pub struct ActorSpec {
    pub(crate) name: Option<Cow<'static, str>>,
    pub(crate) execute: Execute,
    pub(crate) interrupt: Interrupt,
    pub(crate) after: Option<StartSignal>,
    pub(crate) after_start: Option<AfterStart>,
}

impl ActorSpec {
    /// Creates a spec from an execution/interrupt pair.
    ///
    /// `execute` must return once `interrupt` has been called, and `interrupt`
    /// must tolerate being called after `execute` already returned.
    pub fn new<E, Fut, I>(execute: E, interrupt: I) -> Self
    where
        E: FnOnce(StartSignal) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ActorError>> + Send + 'static,
        I: for<'a> FnOnce(Option<&'a ActorError>) + Send + 'static,
    {
        Self {
            name: None,
            execute: Box::new(move |started| -> ActorFuture { Box::pin(execute(started)) }),
            interrupt: Box::new(interrupt),
            after: None,
            after_start: None,
        }
    }

    /// Sets the name used in logs and in [`ActorError::Panicked`].
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Delays the execution until `signal` reports a successful start.
    pub fn after(mut self, signal: &StartSignal) -> Self {
        self.after = Some(signal.clone());
        self
    }

    /// Like [`after`](Self::after), accepting an optional predecessor.
    pub fn after_opt(mut self, signal: Option<&StartSignal>) -> Self {
        self.after = signal.cloned();
        self
    }

    /// Runs `f` once when this actor reports a successful start, before any
    /// dependent observes it.
    pub fn after_start<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.after_start = Some(Box::new(f));
        self
    }

    /// Returns the configured name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
