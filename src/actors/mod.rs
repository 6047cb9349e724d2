//! # Actor abstractions.
//!
//! - [`ActorSpec`] - builder describing one actor (execute/interrupt pair, ordering, hooks)
//! - [`ActorFuture`] - boxed future returned by an execution function
//! - `Actor` - internal per-registration record and execution wrapper

mod actor;
mod spec;

pub(crate) use actor::{Actor, panic_info};
pub use spec::{ActorFuture, ActorSpec};
