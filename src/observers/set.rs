//! # ObserverSet: fan-out over multiple observers
//!
//! [`ObserverSet`] delivers each [`Event`] to every registered observer, in
//! registration order, on the calling thread.
//!
//! ## What it guarantees
//! - Per-invocation event order is preserved for every observer.
//! - Panics inside an observer are caught and logged (isolation); the remaining
//!   observers still receive the event.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        ├────► O1.on_event()
//!        ├────► O2.on_event()   (panic caught → tracing::warn)
//!        └────► ON.on_event()
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::events::Event;

use super::Observe;

/// Ordered collection of observers.
#[derive(Clone, Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn Observe>>,
}

impl ObserverSet {
    /// Creates a set from the given observers.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>) -> Self {
        Self { observers }
    }

    /// Adds one observer at the end.
    pub fn push(&mut self, observer: Arc<dyn Observe>) {
        self.observers.push(observer);
    }

    /// Fan-out one event to all observers.
    pub fn emit(&self, event: &Event) {
        for obs in &self.observers {
            if let Err(panic_err) = catch_unwind(AssertUnwindSafe(|| obs.on_event(event))) {
                tracing::warn!(
                    observer = obs.name(),
                    panic = ?panic_err,
                    "observer panicked while handling event"
                );
            }
        }
    }

    /// True if there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|o| o.name()))
            .finish()
    }
}
