//! # LogWriter: simple event printer
//!
//! A minimal observer that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [attempt] op="orders::fetch" attempt=1
//! [failed] op="orders::fetch" attempt=1 kind=Timeout err="upstream slow"
//! [retry] op="orders::fetch" after_attempt=1 delay_ms=10
//! [callback] op="orders::fetch" after_attempt=1 kind=Timeout
//! [succeeded] op="orders::fetch" attempt=2
//! [aborted] op="orders::fetch" attempt=1 kind=Invalid reason="declared by operation, not retryable"
//! [exhausted] op="orders::fetch" attempt=3 kind=Timeout
//! ```

use crate::events::{Event, EventKind};
use crate::observers::Observe;

/// Event writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Observe for LogWriter {
    fn on_event(&self, e: &Event) {
        let op = e.operation.as_deref().unwrap_or("unknown");
        let attempt = e.attempt.unwrap_or(0);
        let kind = e.failure_kind.as_deref().unwrap_or("-");

        match e.kind {
            EventKind::AttemptStarting => {
                println!("[attempt] op={op:?} attempt={attempt}");
            }
            EventKind::AttemptFailed => {
                println!(
                    "[failed] op={op:?} attempt={attempt} kind={kind} err={:?}",
                    e.reason.as_deref().unwrap_or("")
                );
            }
            EventKind::RetryScheduled => {
                println!(
                    "[retry] op={op:?} after_attempt={attempt} delay_ms={}",
                    e.delay_ms.unwrap_or(0)
                );
            }
            EventKind::CallbackInvoked => {
                println!("[callback] op={op:?} after_attempt={attempt} kind={kind}");
            }
            EventKind::Succeeded => {
                println!("[succeeded] op={op:?} attempt={attempt}");
            }
            EventKind::Aborted => {
                println!(
                    "[aborted] op={op:?} attempt={attempt} kind={kind} reason={:?}",
                    e.reason.as_deref().unwrap_or("")
                );
            }
            EventKind::Exhausted => {
                println!("[exhausted] op={op:?} attempt={attempt} kind={kind}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
