//! # rungroup
//!
//! **rungroup** runs a fixed set of long-running async actors and tears them
//! all down as soon as one of them exits.
//!
//! Actors do not need to understand cancellation tokens: each one is an
//! execute/interrupt pair, and the group calls every interrupt function once
//! any execution returns. Actors can also be chained so that one starts only
//! after another has reported a successful start.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  ActorSpec   │   │  ActorSpec   │   │  ActorSpec   │
//!     │  (db)        │   │  (http)      │   │  (worker)    │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Group                                                            │
//! │  - actors (registration order)                                    │
//! │  - Logger (termination warnings)                                  │
//! │  - Config (termination signals)                                   │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   ┌──────────┐  signal ┌──────────┐       ┌──────────┐
//!   │ actor db │────────►│actor http│       │  worker  │   (one tokio task each)
//!   └────┬─────┘         └────┬─────┘       └────┬─────┘
//!        └───────────┬────────┴──────────────────┘
//!                    ▼
//!          JoinSet (first exit wins)
//!                    │
//!                    ▼
//!       interrupt(err) on every actor ─► drain ─► return err
//! ```
//!
//! ### Startup chain
//! ```text
//! db:    execute(started) ─► started.success() ─► (hook) ─► publish Ok
//! http:  wait(db.started) ─► Ok  ─► execute(started)
//!                         └► Err ─► started.fail(PreviousFailed) (body skipped)
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types                              |
//! |-------------------|----------------------------------------------------------|----------------------------------------|
//! | **Group**         | Run actors, first exit interrupts the rest.              | [`Group`], [`GroupBuilder`]            |
//! | **Actors**        | Execute/interrupt pairs, named, optionally chained.      | [`ActorSpec`], [`ActorFuture`]         |
//! | **Start signals** | Settle-once startup handoff with a post-start hook.      | [`StartSignal`]                        |
//! | **Termination**   | OS signals (or any source) as one more actor.            | [`TerminationSource`], [`OsSignals`]   |
//! | **Errors**        | Typed, cloneable errors with cause chains.               | [`ActorError`]                         |
//! | **Configuration** | Signals observed by the termination actor.               | [`Config`], [`TerminationSignal`]      |
//! | **Logging**       | Injected warn-only sink, `tracing` by default.           | [`Logger`], [`TracingLogger`]          |
//!
//! ## Example
//! ```rust
//! use rungroup::{ActorError, Group, StartSignal};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ActorError> {
//!     let ctx = CancellationToken::new();
//!     let mut group = Group::default();
//!
//!     let (run_ctx, stop_ctx) = (ctx.clone(), ctx.clone());
//!     let db = group.add_after(
//!         move |started: StartSignal| async move {
//!             // connect...
//!             started.success();
//!             run_ctx.cancelled().await;
//!             Ok(())
//!         },
//!         move |_err: Option<&ActorError>| stop_ctx.cancel(),
//!         None,
//!     );
//!
//!     group.add_after_with_hook(
//!         |started: StartSignal| async move {
//!             started.success();
//!             Ok(()) // one-shot job: its exit stops the group
//!         },
//!         |_err: Option<&ActorError>| {},
//!         Some(&db),
//!         || println!("application started"),
//!     );
//!
//!     group.run_with_termination(ctx).await
//! }
//! ```
mod actors;
mod config;
mod core;
mod error;
mod logger;
mod start;

// ---- Public re-exports ----

pub use actors::{ActorFuture, ActorSpec};
pub use config::{Config, TerminationSignal};
pub use core::{Group, GroupBuilder, OsSignals, TerminationSource};
pub use error::ActorError;
pub use logger::{Logger, TracingLogger};
pub use start::{StartOutcome, StartSignal};
