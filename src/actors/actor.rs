//! # Actor record and execution wrapper.
//!
//! An [`Actor`] is what the group stores per registration. At run time it is
//! split into an [`ActorRun`] (moved into its own tokio task) and the interrupt
//! function (kept by the group for the shutdown fan-out).
//!
//! ## Execution flow
//! ```text
//! ActorRun::exec()
//!   ├─► after = None          ─► execute(started)
//!   └─► after = Some(signal)
//!         ├─► wait() == Ok     ─► execute(started)
//!         └─► wait() == Err(e) ─► started.fail(PreviousFailed(e))
//!                                 return Err(PreviousFailed(e))   (body never runs)
//!
//! ActorRun::exec_guarded()
//!   ├─► panic                  ─► Err(Panicked)
//!   └─► started still pending  ─► started.fail(exit error | ExitedBeforeStart)
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::actors::spec::{ActorSpec, Execute, Interrupt};
use crate::error::ActorError;
use crate::start::StartSignal;

/// One registered actor.
pub(crate) struct Actor {
    name: Cow<'static, str>,
    execute: Execute,
    interrupt: Interrupt,
    started: StartSignal,
    after: Option<StartSignal>,
}

impl Actor {
    /// Builds the record for the actor registered at `index`.
    pub(crate) fn from_spec(spec: ActorSpec, index: usize) -> Self {
        let started = match spec.after_start {
            Some(hook) => StartSignal::with_after_start(hook),
            None => StartSignal::new(),
        };
        Self {
            name: spec
                .name
                .unwrap_or_else(|| Cow::Owned(format!("actor-{index}"))),
            execute: spec.execute,
            interrupt: spec.interrupt,
            started,
            after: spec.after,
        }
    }

    /// Returns this actor's own start signal.
    pub(crate) fn started(&self) -> &StartSignal {
        &self.started
    }

    /// Separates the part that runs from the interrupt hook.
    pub(crate) fn split(self) -> (ActorRun, Interrupt) {
        let run = ActorRun {
            name: self.name,
            execute: self.execute,
            started: self.started,
            after: self.after,
        };
        (run, self.interrupt)
    }
}

/// Executable half of an [`Actor`].
pub(crate) struct ActorRun {
    pub(crate) name: Cow<'static, str>,
    execute: Execute,
    started: StartSignal,
    after: Option<StartSignal>,
}

impl ActorRun {
    /// Waits for the predecessor (if any), then runs the body.
    pub(crate) async fn exec(self) -> Result<(), ActorError> {
        let ActorRun {
            name,
            execute,
            started,
            after,
        } = self;

        if let Some(after) = after {
            if let Err(err) = after.wait().await {
                let err = ActorError::PreviousFailed {
                    source: Box::new(err),
                };
                tracing::debug!(actor = %name, error = %err, "predecessor failed to start; skipping body");
                started.fail(err.clone());
                return Err(err);
            }
        }

        tracing::debug!(actor = %name, "actor body starting");
        execute(started).await
    }

    /// Same as [`exec`](Self::exec), with a panic in the actor reported as
    /// [`ActorError::Panicked`] instead of unwinding through the group.
    ///
    /// A start signal left pending on exit is failed, so dependents never wait
    /// on an actor that is gone.
    pub(crate) async fn exec_guarded(self) -> Result<(), ActorError> {
        let name = self.name.to_string();
        let started = self.started.clone();
        let res = match AssertUnwindSafe(self.exec()).catch_unwind().await {
            Ok(res) => res,
            Err(payload) => Err(ActorError::Panicked {
                actor: name.clone(),
                info: panic_info(&*payload),
            }),
        };

        if !started.is_completed() {
            let err = match &res {
                Err(err) => err.clone(),
                Ok(()) => ActorError::ExitedBeforeStart {
                    actor: name.clone(),
                },
            };
            tracing::debug!(actor = %name, error = %err, "actor exited with start pending");
            started.fail(err);
        }
        res
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_info(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
