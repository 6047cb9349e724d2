use std::sync::Arc;

use crate::{
    config::Config,
    logger::{Logger, TracingLogger},
};
use super::group::Group;

/// Builder for constructing a [`Group`] with non-default settings.
pub struct GroupBuilder {
    cfg: Config,
    logger: Option<Arc<dyn Logger>>,
}

impl GroupBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self { cfg, logger: None }
    }

    /// Sets the diagnostic sink used by the termination actor.
    ///
    /// Defaults to [`TracingLogger`].
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds an empty group ready for registrations.
    pub fn build(self) -> Group {
        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));
        Group::new_internal(self.cfg, logger)
    }
}
