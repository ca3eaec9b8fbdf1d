//! # Pre-retry hook discovery.
//!
//! [`CallbackLocator`] walks the override chain (nearest first, within depth)
//! and returns the first attached [`CallbackHandle`]. No hook is a normal case.
//!
//! The executor calls it lazily: only when a retry is actually about to happen,
//! and at most once per invocation.

use crate::failure::Failure;
use crate::operation::{CallbackHandle, TargetContext};

/// Finds the pre-retry hook of a target.
#[derive(Clone, Debug)]
pub struct CallbackLocator {
    depth: Option<usize>,
}

impl CallbackLocator {
    /// Creates a locator searching at most `depth` override layers (`None` = all).
    pub fn new(depth: Option<usize>) -> Self {
        Self { depth }
    }

    /// Returns the nearest hook, if any layer has one.
    pub fn find_callback<E: Failure>(&self, target: &TargetContext<E>) -> Option<CallbackHandle<E>> {
        match target.lookup(self.depth, |layer| layer.callback().cloned()) {
            Some((cb, from)) => {
                tracing::trace!(target_type = target.type_name(), from, "retry callback found");
                Some(cb)
            }
            None => {
                tracing::trace!(target_type = target.type_name(), "no retry callback");
                None
            }
        }
    }
}
