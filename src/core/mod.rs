//! Runtime core: actor group and shutdown.
//!
//! The only public API from this module is [`Group`] (plus its builder and
//! the termination-source seam), which launches actors and drives the
//! first-exit-wins shutdown.
//!
//! Internal modules:
//! - [`group`]: registration, concurrent launch, interrupt fan-out, drain;
//! - [`builder`]: group construction with non-default config/logger;
//! - [`shutdown`]: cross-platform OS signal handling;
//! - [`termination`]: wraps a termination source into an actor.

mod builder;
mod group;
mod shutdown;
mod termination;

pub use builder::GroupBuilder;
pub use group::Group;
pub use shutdown::{OsSignals, TerminationSource};
