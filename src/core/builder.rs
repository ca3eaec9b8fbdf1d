use std::sync::Arc;

use crate::core::{RetryConfig, RetryExecutor};
use crate::observers::{Observe, ObserverSet};

/// Builder for constructing a [`RetryExecutor`] with observers.
pub struct RetryExecutorBuilder {
    cfg: RetryConfig,
    observers: Vec<Arc<dyn Observe>>,
}

impl RetryExecutorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: RetryConfig) -> Self {
        Self {
            cfg,
            observers: Vec::new(),
        }
    }

    /// Sets the event observers, replacing any added before.
    ///
    /// Observers receive every retry event (attempts, failures, retries, outcome)
    /// synchronously, in registration order.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Adds one observer.
    pub fn with_observer(mut self, observer: Arc<dyn Observe>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Builds the executor.
    pub fn build(self) -> RetryExecutor {
        RetryExecutor::from_parts(self.cfg, ObserverSet::new(self.observers))
    }
}
