use std::sync::Arc;

use crate::configurator::Configurator;
use crate::executor::TaskExecutor;

/// Runtime state assembled once at bootstrap and shared read-only afterwards.
///
/// There is no process-wide mutable state: the event bridge receives the
/// context at construction, so holding one is proof that bootstrap completed
/// before any event could be wired.
pub struct RuntimeContext {
    client_side_enabled: bool,
    configurator: Arc<dyn Configurator>,
    executor: Arc<dyn TaskExecutor>,
}

impl RuntimeContext {
    /// Build the context for a resolved configurator. The executor is derived
    /// from the configurator here and never replaced.
    pub fn new(configurator: Arc<dyn Configurator>) -> Self {
        let executor = configurator.executor();
        Self {
            client_side_enabled: true,
            configurator,
            executor,
        }
    }

    pub fn is_client_side_enabled(&self) -> bool {
        self.client_side_enabled
    }

    pub fn configurator(&self) -> Arc<dyn Configurator> {
        Arc::clone(&self.configurator)
    }

    pub fn executor(&self) -> Arc<dyn TaskExecutor> {
        Arc::clone(&self.executor)
    }
}
