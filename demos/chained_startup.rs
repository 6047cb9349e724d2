//! # Example: chained_startup
//!
//! Two long-running actors where the second one starts only after the first
//! has reported a successful start. An "application started" hook fires once
//! the second actor is up.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► actor 1: sleep 1s ─► started.success() ─► wait for ctx
//!   ├─► actor 2: wait(actor 1) ─► sleep 1s ─► started.success() ─► wait for ctx
//!   │                                               └─► "application started"
//!   └─► run_with_termination(ctx)
//!         └─► Ctrl-C / SIGTERM ─► interrupt both ─► "application stopped"
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example chained_startup
//! ```

use std::time::Duration;

use rungroup::{ActorError, Group, StartSignal};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_target(true)
        .init();

    let ctx = CancellationToken::new();
    let mut group = Group::default();

    let (run_ctx, stop_ctx) = (ctx.clone(), ctx.clone());
    let start1 = group.add_after(
        move |started: StartSignal| async move {
            info!("start actor 1");
            tokio::time::sleep(Duration::from_secs(1)).await;
            started.success();

            run_ctx.cancelled().await;
            Ok(())
        },
        move |_err: Option<&ActorError>| {
            info!("interrupt actor 1");
            stop_ctx.cancel();
        },
        None,
    );

    let (run_ctx, stop_ctx) = (ctx.clone(), ctx.clone());
    group.add_after_with_hook(
        move |started: StartSignal| async move {
            info!("start actor 2");
            tokio::time::sleep(Duration::from_secs(1)).await;
            started.success();

            run_ctx.cancelled().await;
            Ok(())
        },
        move |_err: Option<&ActorError>| {
            info!("interrupt actor 2");
            stop_ctx.cancel();
        },
        Some(&start1),
        || info!("application started"),
    );

    group.run_with_termination(ctx).await?;

    info!("application stopped");
    Ok(())
}
