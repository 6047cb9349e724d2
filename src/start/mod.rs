//! # Startup ordering between actors.
//!
//! - [`StartSignal`] - settle-once handoff announcing an actor's startup outcome
//! - [`StartOutcome`] - value carried by the signal

mod signal;

pub(crate) use signal::AfterStart;
pub use signal::{StartOutcome, StartSignal};
