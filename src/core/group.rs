//! # Group: runs actors concurrently, first exit interrupts everyone.
//!
//! The [`Group`] owns the registered actors, launches one tokio task per actor,
//! and drives the shutdown protocol.
//!
//! ## Key responsibilities
//! - register actors, optionally chained through [`StartSignal`]s
//! - spawn every actor at once into a [`JoinSet`]
//! - on the first exit, call every interrupt function with that exit's error
//! - wait for all remaining actors before returning the first error
//!
//! ## Shutdown protocol
//! ```text
//! run():
//!   actors == 0 ─► Ok(())
//!
//!   Actor[0]   Actor[1]   ...   Actor[N-1]
//!      │          │                 │
//!      └──► set.spawn(exec_guarded())          (one task per actor)
//!
//!   err = set.join_next()                      (first to exit, Ok or Err)
//!   for interrupt in registration order:
//!       interrupt(err.as_ref().err())          (sync, panics logged and skipped)
//!   while set.join_next() ...                  (drain the other N-1)
//!   return err
//! ```
//!
//! ## Rules
//! - A clean exit (`Ok`) stops the group too: when any actor stops, the group stops.
//! - Only the first exit is reported; errors raised during shutdown are discarded.
//! - `run` never returns while an actor is still executing. An actor that ignores
//!   its interrupt keeps `run` waiting forever.
//! - An actor that exits without reporting its start fails its [`StartSignal`],
//!   so dependents still waiting on it give up with `PreviousFailed`.
//! - A panicking interrupt does not stop the fan-out; the remaining interrupts
//!   still run and the group is drained.
//!
//! ## Example
//! ```rust
//! use rungroup::{ActorError, Group, StartSignal};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let stop = CancellationToken::new();
//! let mut group = Group::default();
//!
//! // Long-running server that stops when interrupted.
//! let (server_stop, server_interrupt) = (stop.clone(), stop.clone());
//! let ready = group.add_after(
//!     move |started: StartSignal| async move {
//!         started.success();
//!         server_stop.cancelled().await;
//!         Ok(())
//!     },
//!     move |_err: Option<&ActorError>| server_interrupt.cancel(),
//!     None,
//! );
//!
//! // Runs once the server is up, then fails and takes the group down.
//! group.add_after(
//!     |_started: StartSignal| async { Err(ActorError::fail("job failed")) },
//!     |_err: Option<&ActorError>| {},
//!     Some(&ready),
//! );
//!
//! assert_eq!(group.run().await, Err(ActorError::fail("job failed")));
//! # }
//! ```

use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{
    actors::{Actor, ActorSpec, panic_info},
    config::Config,
    core::{
        builder::GroupBuilder,
        shutdown::{OsSignals, TerminationSource},
        termination::termination_actor,
    },
    error::ActorError,
    logger::{Logger, TracingLogger},
    start::StartSignal,
};

/// Collects actors and runs them until the first one exits.
///
/// `Group::default()` is a valid, empty group; running it returns `Ok(())`.
pub struct Group {
    actors: Vec<Actor>,
    cfg: Config,
    logger: Arc<dyn Logger>,
}

impl Group {
    /// Creates an empty group reporting through `logger`.
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::new_internal(Config::default(), logger)
    }

    /// Returns a builder for a group with custom [`Config`].
    pub fn builder(cfg: Config) -> GroupBuilder {
        GroupBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: Config, logger: Arc<dyn Logger>) -> Self {
        Self {
            actors: Vec::new(),
            cfg,
            logger,
        }
    }

    /// Registers an independent actor.
    ///
    /// `execute` must return once `interrupt` has been called, and `interrupt`
    /// must be safe to call after `execute` already returned.
    pub fn add<E, Fut, I>(&mut self, execute: E, interrupt: I)
    where
        E: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ActorError>> + Send + 'static,
        I: for<'a> FnOnce(Option<&'a ActorError>) + Send + 'static,
    {
        self.add_spec(ActorSpec::new(move |_started: StartSignal| execute(), interrupt));
    }

    /// Registers an actor that starts only after `after` reports success.
    ///
    /// Returns the new actor's own start signal, so further actors can be
    /// chained after it. If `after` fails, `execute` is never called and the
    /// returned signal fails with [`ActorError::PreviousFailed`].
    pub fn add_after<E, Fut, I>(
        &mut self,
        execute: E,
        interrupt: I,
        after: Option<&StartSignal>,
    ) -> StartSignal
    where
        E: FnOnce(StartSignal) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ActorError>> + Send + 'static,
        I: for<'a> FnOnce(Option<&'a ActorError>) + Send + 'static,
    {
        self.add_spec(ActorSpec::new(execute, interrupt).after_opt(after))
    }

    /// Same as [`add_after`](Self::add_after), with `after_start` run once when
    /// the new actor reports success and before any dependent observes it.
    pub fn add_after_with_hook<E, Fut, I, H>(
        &mut self,
        execute: E,
        interrupt: I,
        after: Option<&StartSignal>,
        after_start: H,
    ) -> StartSignal
    where
        E: FnOnce(StartSignal) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ActorError>> + Send + 'static,
        I: for<'a> FnOnce(Option<&'a ActorError>) + Send + 'static,
        H: FnOnce() + Send + 'static,
    {
        self.add_spec(
            ActorSpec::new(execute, interrupt)
                .after_opt(after)
                .after_start(after_start),
        )
    }

    /// Registers an actor described by `spec` and returns its start signal.
    pub fn add_spec(&mut self, spec: ActorSpec) -> StartSignal {
        let actor = Actor::from_spec(spec, self.actors.len());
        let started = actor.started().clone();
        self.actors.push(actor);
        started
    }

    /// Returns the number of registered actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns `true` if no actor is registered.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Returns the group configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Runs all actors concurrently.
    ///
    /// When the first actor returns, every actor is interrupted with its
    /// error. Returns that first error once all actors have exited.
    pub async fn run(self) -> Result<(), ActorError> {
        if self.actors.is_empty() {
            return Ok(());
        }
        let count = self.actors.len();
        tracing::debug!(actors = count, "starting actor group");

        let mut set = JoinSet::new();
        let mut interrupts = Vec::with_capacity(count);
        for actor in self.actors {
            let (run, interrupt) = actor.split();
            interrupts.push(interrupt);
            set.spawn(run.exec_guarded());
        }

        let err = match set.join_next().await {
            Some(res) => flatten(res),
            None => Ok(()),
        };
        match &err {
            Ok(()) => tracing::debug!("first actor exited cleanly; interrupting group"),
            Err(e) => tracing::debug!(error = %e, "first actor failed; interrupting group"),
        }

        let cause = err.as_ref().err();
        for (index, interrupt) in interrupts.into_iter().enumerate() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| interrupt(cause))) {
                tracing::warn!(
                    index,
                    info = %panic_info(&*payload),
                    "interrupt panicked; continuing shutdown"
                );
            }
        }

        while let Some(res) = set.join_next().await {
            if let Err(e) = flatten(res) {
                tracing::debug!(error = %e, "actor exited during shutdown");
            }
        }
        tracing::debug!(actors = count, "actor group stopped");

        err
    }

    /// Adds a termination actor listening to [`Config::signals`] and runs the group.
    ///
    /// A received signal stops the group and is reported as `Ok(())` after a
    /// warning through the group's [`Logger`]. Cancelling `token` stops the
    /// group cleanly as well. An empty group returns immediately.
    pub async fn run_with_termination(self, token: CancellationToken) -> Result<(), ActorError> {
        let source = OsSignals::new(self.cfg.unique_signals());
        self.run_with_source(token, source).await
    }

    /// Same as [`run_with_termination`](Self::run_with_termination) with a custom
    /// [`TerminationSource`].
    pub async fn run_with_source<S: TerminationSource>(
        mut self,
        token: CancellationToken,
        source: S,
    ) -> Result<(), ActorError> {
        if self.actors.is_empty() {
            return Ok(());
        }
        let spec = termination_actor(source, token, Arc::clone(&self.logger));
        self.add_spec(spec);
        self.run().await
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("actors", &self.actors.len())
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Maps a join result onto the actor outcome.
///
/// Panics are already caught inside the task; a join error here means the
/// runtime cancelled the task.
fn flatten(res: Result<Result<(), ActorError>, JoinError>) -> Result<(), ActorError> {
    match res {
        Ok(r) => r,
        Err(je) if je.is_panic() => Err(ActorError::Panicked {
            actor: "unknown".to_string(),
            info: je.to_string(),
        }),
        Err(_cancelled) => Err(ActorError::Canceled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    const LIMIT: Duration = Duration::from_secs(1);

    /// Actor body that blocks until its interrupt fires.
    fn blocking(
        stop: CancellationToken,
    ) -> (
        impl FnOnce() -> futures::future::BoxFuture<'static, Result<(), ActorError>> + Send + 'static,
        impl for<'a> FnOnce(Option<&'a ActorError>) + Send + 'static,
    ) {
        let wait = stop.clone();
        (
            move || -> futures::future::BoxFuture<'static, Result<(), ActorError>> {
                Box::pin(async move {
                    wait.cancelled().await;
                    Ok(())
                })
            },
            move |_err: Option<&ActorError>| stop.cancel(),
        )
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    impl Logger for Collect {
        fn warn(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    struct Fires(Result<String, ActorError>);

    #[async_trait]
    impl TerminationSource for Fires {
        async fn terminated(&self) -> Result<String, ActorError> {
            self.0.clone()
        }
    }

    struct Never;

    #[async_trait]
    impl TerminationSource for Never {
        async fn terminated(&self) -> Result<String, ActorError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_zero() {
        let group = Group::default();
        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Ok(()));
    }

    #[tokio::test]
    async fn test_one() {
        let err = ActorError::fail("foobar");
        let mut group = Group::default();
        let e = err.clone();
        group.add(move || async move { Err(e) }, |_| {});

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Err(err));
    }

    #[tokio::test]
    async fn test_many() {
        let err = ActorError::fail("interrupt");
        let mut group = Group::default();
        let e = err.clone();
        group.add(move || async move { Err(e) }, |_| {});
        let (exec, interrupt) = blocking(CancellationToken::new());
        group.add(exec, interrupt);

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Err(err));
    }

    #[tokio::test]
    async fn test_clean_actors_return_ok() {
        let mut group = Group::default();
        for _ in 0..5 {
            let (exec, interrupt) = blocking(CancellationToken::new());
            group.add(exec, interrupt);
        }
        group.add(|| async { Ok(()) }, |_| {});

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Ok(()));
    }

    #[tokio::test]
    async fn test_every_interrupt_gets_first_error_once() {
        let err = ActorError::fail("first");
        let seen: Arc<Mutex<Vec<Option<ActorError>>>> = Arc::default();
        let mut group = Group::default();

        let e = err.clone();
        let s = seen.clone();
        group.add(
            move || async move { Err(e) },
            move |err: Option<&ActorError>| s.lock().unwrap().push(err.cloned()),
        );
        for _ in 0..3 {
            let stop = CancellationToken::new();
            let wait = stop.clone();
            let s = seen.clone();
            group.add(
                move || async move {
                    wait.cancelled().await;
                    Err(ActorError::fail("late"))
                },
                move |err: Option<&ActorError>| {
                    s.lock().unwrap().push(err.cloned());
                    stop.cancel();
                },
            );
        }

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Err(err.clone()));
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|e| e.as_ref() == Some(&err)));
    }

    #[tokio::test]
    async fn test_run_waits_for_all_actors() {
        let exited = Arc::new(AtomicUsize::new(0));
        let mut group = Group::default();

        group.add(|| async { Ok(()) }, |_| {});
        for _ in 0..3 {
            let stop = CancellationToken::new();
            let wait = stop.clone();
            let exited = exited.clone();
            group.add(
                move || async move {
                    wait.cancelled().await;
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    exited.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                move |_| stop.cancel(),
            );
        }

        timeout(LIMIT, group.run()).await.expect("timeout").unwrap();
        assert_eq!(exited.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_add_after_runs_in_order() {
        const COUNT: usize = 10;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut group = Group::default();

        let mut prev: Option<StartSignal> = None;
        for n in 0..COUNT {
            let tx = tx.clone();
            prev = Some(group.add_after(
                move |started: StartSignal| async move {
                    let _ = tx.send(n);
                    started.success();
                    Ok(())
                },
                |_| {},
                prev.as_ref(),
            ));
        }
        drop(tx);

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Ok(()));

        let mut have = Vec::with_capacity(COUNT);
        while let Some(n) = rx.recv().await {
            have.push(n);
        }
        assert_eq!(have, (0..COUNT).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_add_after_error_skips_dependent() {
        let want = ActorError::fail("test error");
        let dependent_ran = Arc::new(AtomicBool::new(false));
        let mut group = Group::default();

        let w = want.clone();
        let first = group.add_after(
            move |started: StartSignal| async move {
                started.fail(w.clone());
                Err(w)
            },
            |_| {},
            None,
        );
        let ran = dependent_ran.clone();
        let second = group.add_after(
            move |_started: StartSignal| async move {
                ran.store(true, Ordering::SeqCst);
                Ok(())
            },
            |_| {},
            Some(&first),
        );

        let err = timeout(LIMIT, group.run())
            .await
            .expect("timeout")
            .unwrap_err();
        assert!(err.is_caused_by(&want), "unexpected error: {err}");
        assert!(!dependent_ran.load(Ordering::SeqCst));

        let second_outcome = second.outcome().expect("second signal completed");
        let second_err = second_outcome.unwrap_err();
        assert!(matches!(second_err, ActorError::PreviousFailed { .. }));
        assert_eq!(second_err.root_cause(), &want);
    }

    #[tokio::test]
    async fn test_failure_propagates_down_the_chain() {
        let want = ActorError::fail("root");
        let ran = Arc::new(AtomicUsize::new(0));
        let mut group = Group::default();

        let w = want.clone();
        let mut prev = group.add_after(
            move |started: StartSignal| async move {
                started.fail(w);
                Ok(())
            },
            |_| {},
            None,
        );
        for _ in 0..3 {
            let ran = ran.clone();
            prev = group.add_after(
                move |_started: StartSignal| async move {
                    ran.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                |_| {},
                Some(&prev),
            );
        }

        timeout(LIMIT, group.run()).await.expect("timeout").ok();
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        let last = prev.outcome().expect("last signal completed").unwrap_err();
        assert_eq!(last.root_cause(), &want);
    }

    #[tokio::test]
    async fn test_after_start_hook() {
        let start = Arc::new(AtomicBool::new(false));
        let after_start = Arc::new(AtomicBool::new(false));
        let mut group = Group::default();

        let s = start.clone();
        let (hook_start, hook_after) = (start.clone(), after_start.clone());
        group.add_after_with_hook(
            move |started: StartSignal| async move {
                s.store(true, Ordering::SeqCst);
                started.success();
                Ok(())
            },
            |_| {},
            None,
            move || {
                assert!(
                    hook_start.load(Ordering::SeqCst),
                    "actor did not start before the hook"
                );
                hook_after.store(true, Ordering::SeqCst);
            },
        );

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Ok(()));
        assert!(start.load(Ordering::SeqCst));
        assert!(after_start.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_hook_runs_before_dependent_starts() {
        let hooked = Arc::new(AtomicBool::new(false));
        let observed = Arc::new(AtomicBool::new(false));
        let stop = CancellationToken::new();
        let mut group = Group::default();

        let h = hooked.clone();
        let (wait, interrupt) = (stop.clone(), stop.clone());
        let first = group.add_spec(
            ActorSpec::new(
                move |started: StartSignal| async move {
                    started.success();
                    wait.cancelled().await;
                    Ok(())
                },
                move |_err: Option<&ActorError>| interrupt.cancel(),
            )
            .named("first")
            .after_start(move || h.store(true, Ordering::SeqCst)),
        );

        let (h, o) = (hooked.clone(), observed.clone());
        group.add_after(
            move |_started: StartSignal| async move {
                o.store(h.load(Ordering::SeqCst), Ordering::SeqCst);
                Ok(())
            },
            |_| {},
            Some(&first),
        );

        timeout(LIMIT, group.run()).await.expect("timeout").unwrap();
        assert!(observed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicking_actor_stops_group() {
        let mut group = Group::default();
        group.add_spec(
            ActorSpec::new(
                |_started: StartSignal| async {
                    if true {
                        panic!("bad actor");
                    }
                    Ok(())
                },
                |_err: Option<&ActorError>| {},
            )
            .named("bad"),
        );
        let (exec, interrupt) = blocking(CancellationToken::new());
        group.add(exec, interrupt);

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(
            res,
            Err(ActorError::Panicked {
                actor: "bad".into(),
                info: "bad actor".into(),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_chained_actors_stop_on_external_cancel() {
        let ctx = CancellationToken::new();
        let interrupted = Arc::new(AtomicUsize::new(0));
        let second_started = Arc::new(AtomicBool::new(false));
        let mut group = Group::default();

        let (c, i) = (ctx.clone(), interrupted.clone());
        let interrupt_ctx = ctx.clone();
        let first = group.add_after(
            move |started: StartSignal| async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                started.success();
                c.cancelled().await;
                Ok(())
            },
            move |_| {
                i.fetch_add(1, Ordering::SeqCst);
                interrupt_ctx.cancel();
            },
            None,
        );

        let (c, i, s) = (ctx.clone(), interrupted.clone(), second_started.clone());
        let interrupt_ctx = ctx.clone();
        let first_done = first.clone();
        group.add_after(
            move |started: StartSignal| async move {
                assert!(first_done.is_completed());
                s.store(true, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(1)).await;
                started.success();
                c.cancelled().await;
                Ok(())
            },
            move |_| {
                i.fetch_add(1, Ordering::SeqCst);
                interrupt_ctx.cancel();
            },
            Some(&first),
        );

        ctx.cancel();
        let res = timeout(Duration::from_secs(10), group.run_with_source(ctx.clone(), Never))
            .await
            .expect("timeout");

        assert_eq!(res, Ok(()));
        assert_eq!(interrupted.load(Ordering::SeqCst), 2);
        assert_eq!(first.outcome(), Some(Ok(())));
        assert!(second_started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_termination_is_logged_and_normalized() {
        let logger = Arc::new(Collect::default());
        let mut group = Group::builder(Config::default())
            .with_logger(logger.clone())
            .build();
        let (exec, interrupt) = blocking(CancellationToken::new());
        group.add(exec, interrupt);

        let res = timeout(
            LIMIT,
            group.run_with_source(CancellationToken::new(), Fires(Ok("SIGTERM".into()))),
        )
        .await
        .expect("timeout");

        assert_eq!(res, Ok(()));
        assert_eq!(
            *logger.0.lock().unwrap(),
            vec!["received signal SIGTERM".to_string()]
        );
    }

    #[tokio::test]
    async fn test_termination_source_error_propagates() {
        let logger = Arc::new(Collect::default());
        let mut group = Group::new(logger.clone());
        let (exec, interrupt) = blocking(CancellationToken::new());
        group.add(exec, interrupt);

        let broken = ActorError::Signal {
            error: "no signal support".into(),
        };
        let res = timeout(
            LIMIT,
            group.run_with_source(CancellationToken::new(), Fires(Err(broken.clone()))),
        )
        .await
        .expect("timeout");

        assert_eq!(res, Err(broken));
        assert!(logger.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_termination_actor_is_interrupted_by_others() {
        let err = ActorError::fail("app failed");
        let mut group = Group::default();
        let e = err.clone();
        group.add(move || async move { Err(e) }, |_| {});

        let res = timeout(LIMIT, group.run_with_source(CancellationToken::new(), Never))
            .await
            .expect("timeout");
        assert_eq!(res, Err(err));
    }

    #[tokio::test]
    async fn test_empty_group_with_termination_returns_immediately() {
        let group = Group::default();
        let res = timeout(LIMIT, group.run_with_source(CancellationToken::new(), Never))
            .await
            .expect("timeout");
        assert_eq!(res, Ok(()));
    }

    #[tokio::test]
    async fn test_interrupts_fire_in_registration_order() {
        let order: Arc<Mutex<Vec<usize>>> = Arc::default();
        let mut group = Group::default();

        let o = order.clone();
        group.add(
            || async { Err(ActorError::fail("first")) },
            move |_err: Option<&ActorError>| o.lock().unwrap().push(0),
        );
        for index in 1..5 {
            let stop = CancellationToken::new();
            let wait = stop.clone();
            let o = order.clone();
            group.add(
                move || async move {
                    wait.cancelled().await;
                    Ok(())
                },
                move |_err: Option<&ActorError>| {
                    o.lock().unwrap().push(index);
                    stop.cancel();
                },
            );
        }

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Err(ActorError::fail("first")));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_panicking_predecessor_releases_dependent() {
        let dependent_ran = Arc::new(AtomicBool::new(false));
        let mut group = Group::default();

        let first = group.add_spec(
            ActorSpec::new(
                |_started: StartSignal| async {
                    if true {
                        panic!("died while starting");
                    }
                    Ok(())
                },
                |_err: Option<&ActorError>| {},
            )
            .named("db"),
        );
        let ran = dependent_ran.clone();
        let second = group.add_after(
            move |started: StartSignal| async move {
                ran.store(true, Ordering::SeqCst);
                started.success();
                Ok(())
            },
            |_| {},
            Some(&first),
        );

        let want = ActorError::Panicked {
            actor: "db".into(),
            info: "died while starting".into(),
        };
        let err = timeout(LIMIT, group.run())
            .await
            .expect("timeout")
            .unwrap_err();
        assert!(err.is_caused_by(&want), "unexpected error: {err}");
        assert!(!dependent_ran.load(Ordering::SeqCst));
        assert_eq!(first.outcome(), Some(Err(want.clone())));
        let second_err = second.outcome().expect("second signal completed").unwrap_err();
        assert_eq!(second_err.root_cause(), &want);
    }

    #[tokio::test]
    async fn test_failing_predecessor_without_signal_releases_dependent() {
        let want = ActorError::fail("no start reported");
        let dependent_ran = Arc::new(AtomicBool::new(false));
        let mut group = Group::default();

        let w = want.clone();
        let first = group.add_after(
            move |_started: StartSignal| async move { Err(w) },
            |_| {},
            None,
        );
        let ran = dependent_ran.clone();
        group.add_after(
            move |_started: StartSignal| async move {
                ran.store(true, Ordering::SeqCst);
                Ok(())
            },
            |_| {},
            Some(&first),
        );

        let err = timeout(LIMIT, group.run())
            .await
            .expect("timeout")
            .unwrap_err();
        assert!(err.is_caused_by(&want), "unexpected error: {err}");
        assert!(!dependent_ran.load(Ordering::SeqCst));
        assert_eq!(first.outcome(), Some(Err(want)));
    }

    #[tokio::test]
    async fn test_clean_predecessor_without_signal_releases_dependent() {
        let dependent_ran = Arc::new(AtomicBool::new(false));
        let mut group = Group::default();

        let first = group.add_spec(
            ActorSpec::new(
                |_started: StartSignal| async { Ok(()) },
                |_err: Option<&ActorError>| {},
            )
            .named("oneshot"),
        );
        let ran = dependent_ran.clone();
        let second = group.add_after(
            move |_started: StartSignal| async move {
                ran.store(true, Ordering::SeqCst);
                Ok(())
            },
            |_| {},
            Some(&first),
        );

        let want = ActorError::ExitedBeforeStart {
            actor: "oneshot".into(),
        };
        // Either exit may be joined first: the clean one or the dependent's failure.
        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        if let Err(err) = res {
            assert!(err.is_caused_by(&want), "unexpected error: {err}");
        }
        assert!(!dependent_ran.load(Ordering::SeqCst));

        assert_eq!(first.outcome(), Some(Err(want.clone())));
        let second_err = second.outcome().expect("second signal completed").unwrap_err();
        assert_eq!(second_err.root_cause(), &want);
    }

    #[tokio::test]
    async fn test_panicking_interrupt_still_drains_group() {
        let exited = Arc::new(AtomicUsize::new(0));
        let mut group = Group::default();

        group.add(|| async { Err(ActorError::fail("first")) }, |_| {});

        let stop = CancellationToken::new();
        let wait = stop.clone();
        let e = exited.clone();
        group.add(
            move || async move {
                wait.cancelled().await;
                e.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
            move |_err: Option<&ActorError>| {
                stop.cancel();
                panic!("interrupt blew up");
            },
        );

        let stop = CancellationToken::new();
        let wait = stop.clone();
        let e = exited.clone();
        group.add(
            move || async move {
                wait.cancelled().await;
                e.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
            move |_err: Option<&ActorError>| stop.cancel(),
        );

        let res = timeout(LIMIT, group.run()).await.expect("timeout");
        assert_eq!(res, Err(ActorError::fail("first")));
        assert_eq!(exited.load(Ordering::SeqCst), 2);
    }
}
