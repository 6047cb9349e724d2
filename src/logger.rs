//! # Diagnostic sink for the group.
//!
//! [`Logger`] is the only logging capability the group holds. It is injected at
//! construction and used to report a clean external termination
//! (see [`Group::run_with_termination`](crate::Group::run_with_termination)).
//!
//! The default [`TracingLogger`] forwards to [`tracing::warn!`]; install any
//! `tracing` subscriber to see the output.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use rungroup::{Group, Logger};
//!
//! #[derive(Default)]
//! struct Collect(Mutex<Vec<String>>);
//!
//! impl Logger for Collect {
//!     fn warn(&self, message: &str) {
//!         self.0.lock().unwrap().push(message.to_string());
//!     }
//! }
//!
//! let group = Group::new(Arc::new(Collect::default()));
//! assert!(group.is_empty());
//! ```

/// Minimal diagnostic sink with a single `warn` operation.
///
/// ### Implementation requirements
/// - Must not block for long: it is called from the termination actor's task.
/// - Handle errors internally; do not panic.
pub trait Logger: Send + Sync + 'static {
    /// Records a warning-level message.
    fn warn(&self, message: &str);
}

/// [`Logger`] that emits through `tracing` under the `rungroup` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "rungroup", "{message}");
    }
}
