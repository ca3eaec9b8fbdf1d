//! # Observe: user-facing event handlers
//!
//! The [`Observe`] trait is the main **extension point** for watching retries.
//! Every [`Event`] an invocation produces is handed to each registered observer.
//!
//! Implementing your own observer allows you to plug in:
//! - metrics export;
//! - custom alerting on exhausted retries;
//! - structured logging.
//!
//! ```text
//! RetryExecutor ── emit(Event) ──► ObserverSet ──► Observe::on_event(&Event)
//!                                                     │
//!                        ┌────────────────────────────┼──────────────────┐
//!                        ▼                            ▼                  ▼
//!                    LogWriter                 MetricsObserver     CustomObserver
//! ```
//!
//! ## Rules
//! - Called **synchronously** on the invoking thread, between attempts: keep it cheap.
//! - Panics are caught per observer and do not affect the invocation.
//!
//! # Example: custom observer
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use retryvisor::{Event, EventKind, Observe};
//!
//! #[derive(Default)]
//! struct ExhaustedCounter(AtomicU64);
//!
//! impl Observe for ExhaustedCounter {
//!     fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::Exhausted {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "exhausted-counter" }
//! }
//! ```

use crate::events::Event;

/// Trait for receiving retry events.
pub trait Observe: Send + Sync + 'static {
    /// Called for every emitted [`Event`].
    fn on_event(&self, event: &Event);

    /// Returns the observer name used in diagnostics.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
