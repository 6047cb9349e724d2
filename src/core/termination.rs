//! # Termination actor.
//!
//! Turns a [`TerminationSource`] into one more execute/interrupt pair so that
//! external stop requests go through the same shutdown path as any actor.
//!
//! ```text
//! execute:
//!   select {
//!     source.terminated() ─► Ok(signal) ─► Terminated{signal} ─► logger.warn ─► Ok(())
//!                         └► Err(e)     ─► Err(e)              (propagated)
//!     token cancelled     ─► Ok(())
//!     interrupted         ─► Ok(())
//!   }
//! interrupt:
//!   cancel the actor's own child token
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::actors::ActorSpec;
use crate::core::shutdown::TerminationSource;
use crate::error::ActorError;
use crate::logger::Logger;
use crate::start::StartSignal;

/// Name under which the termination actor is registered.
pub(crate) const TERMINATION_ACTOR: &str = "termination";

/// Builds the termination actor for `source`.
///
/// `token` is the caller's shutdown context; cancelling it stops the actor
/// cleanly and therefore the whole group.
pub(crate) fn termination_actor<S: TerminationSource>(
    source: S,
    token: CancellationToken,
    logger: Arc<dyn Logger>,
) -> ActorSpec {
    let stop = token.child_token();
    let interrupt_stop = stop.clone();

    ActorSpec::new(
        move |_started: StartSignal| async move {
            let res = tokio::select! {
                res = source.terminated() => match res {
                    Ok(signal) => Err(ActorError::Terminated { signal }),
                    Err(e) => Err(e),
                },
                _ = stop.cancelled() => Ok(()),
            };

            match res {
                Err(err) if err.is_termination() => {
                    logger.warn(&err.to_string());
                    Ok(())
                }
                other => other,
            }
        },
        move |_err: Option<&ActorError>| interrupt_stop.cancel(),
    )
    .named(TERMINATION_ACTOR)
}
