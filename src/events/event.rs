//! # Retry lifecycle events.
//!
//! The [`EventKind`] enum classifies what happens during one invocation:
//! - **Attempt events**: an attempt starts or fails
//! - **Retry events**: a delay is scheduled, the pre-retry hook runs
//! - **Terminal events**: success, abort (non-retryable), exhaustion
//!
//! The [`Event`] struct carries metadata such as the operation name, attempt
//! number, delay and failure details.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Events of one invocation are emitted sequentially from the
//! invoking thread.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::RetryScheduled)
//!     .with_operation("orders::fetch")
//!     .with_attempt(2)
//!     .with_delay(Duration::from_millis(10))
//!     .with_reason("Timeout: upstream slow");
//!
//! assert_eq!(ev.kind, EventKind::RetryScheduled);
//! assert_eq!(ev.operation.as_deref(), Some("orders::fetch"));
//! assert_eq!(ev.delay_ms, Some(10));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of retry events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Attempt events ===
    /// An attempt is about to call the operation.
    ///
    /// Sets:
    /// - `operation`: operation name
    /// - `attempt`: attempt number (1-based)
    AttemptStarting,

    /// The attempt failed.
    ///
    /// Sets:
    /// - `operation`, `attempt`
    /// - `failure_kind`: kind of the root cause
    /// - `reason`: root cause message
    AttemptFailed,

    // === Retry events ===
    /// The executor is about to sleep before the next attempt.
    ///
    /// Sets:
    /// - `operation`, `attempt` (the failed one)
    /// - `delay_ms`: delay before the next attempt
    /// - `reason`: root cause message
    RetryScheduled,

    /// The pre-retry hook was invoked.
    ///
    /// Sets:
    /// - `operation`, `attempt` (the failed one)
    /// - `failure_kind`
    CallbackInvoked,

    // === Terminal events ===
    /// The operation returned successfully.
    ///
    /// Sets:
    /// - `operation`, `attempt`
    Succeeded,

    /// The root cause is not retryable; returned immediately.
    ///
    /// Sets:
    /// - `operation`, `attempt`, `failure_kind`
    /// - `reason`: whether the kind was declared by the operation
    Aborted,

    /// Every attempt failed with a retryable root cause.
    ///
    /// Sets:
    /// - `operation`, `attempt` (the last one), `failure_kind`, `reason`
    Exhausted,
}

impl EventKind {
    /// Returns `true` for `Succeeded`, `Aborted` and `Exhausted`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::Succeeded | EventKind::Aborted | EventKind::Exhausted
        )
    }
}

/// Retry event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the operation.
    pub operation: Option<Arc<str>>,
    /// Attempt number (starting from 1).
    pub attempt: Option<u32>,
    /// Delay before the next attempt in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Debug rendering of the root cause kind.
    pub failure_kind: Option<Arc<str>>,
    /// Human-readable reason (failure message, abort detail).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            operation: None,
            attempt: None,
            delay_ms: None,
            failure_kind: None,
            reason: None,
        }
    }

    /// Attaches an operation name.
    #[inline]
    pub fn with_operation(mut self, operation: impl Into<Arc<str>>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attaches an attempt number.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches the root cause kind.
    #[inline]
    pub fn with_failure_kind(mut self, kind: impl std::fmt::Debug) -> Self {
        self.failure_kind = Some(format!("{kind:?}").into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
