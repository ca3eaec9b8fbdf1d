//! # Decision logic of one invocation.
//!
//! [`Invocation`] holds the per-call state of the retry loop: the resolved
//! policy, the retryable set, the lazily located hook, the attempt index and the
//! current [`RetryState`]. It decides what happens after each outcome; the
//! executor only performs the calls and the waits, so the blocking and the async
//! flavours share exactly the same behaviour.
//!
//! ## Failure handling
//! ```text
//! Err(e) ──► root_cause(e) ──► publish AttemptFailed
//!              │
//!              ├─ kind not in retryable set ─► Aborted,   Step::Stop(root)
//!              ├─ index < attempts ─────────► locate hook (once)
//!              │                               publish RetryScheduled (if waiting)
//!              │                               Step::Retry { root, pause }
//!              └─ index == attempts ────────► Exhausted, Step::Stop(root)
//! ```
//!
//! ## Rules
//! - Nothing here is shared between invocations.
//! - The hook is looked up at most once, and only when a retry actually happens.
//! - The value handed back in `Step::Stop` is always the root cause, never a wrapper.

use std::fmt;
use std::time::Duration;

use crate::core::{RetryExecutor, RetryState};
use crate::events::{Event, EventKind};
use crate::failure::{Failure, root_cause};
use crate::operation::{CallbackHandle, OperationDescriptor, TargetContext};
use crate::resolvers::{RetryPolicy, RetryableSet};

/// What the executor does after a failed attempt.
pub(crate) enum Step<E> {
    /// Wait `pause` (if any), call [`Invocation::prepare_retry`], attempt again.
    Retry { cause: E, pause: Option<Duration> },
    /// Return the root cause to the caller.
    Stop(E),
}

pub(crate) struct Invocation<'a, E: Failure> {
    exec: &'a RetryExecutor,
    op: &'a OperationDescriptor<E::Kind>,
    target: &'a TargetContext<E>,
    policy: RetryPolicy,
    retryable: RetryableSet<E::Kind>,
    callback: Option<Option<CallbackHandle<E>>>,
    index: u32,
    state: RetryState,
}

impl<'a, E> Invocation<'a, E>
where
    E: Failure + fmt::Display,
{
    /// Resolves the policy and the retryable set for one call.
    pub(crate) fn begin(
        exec: &'a RetryExecutor,
        op: &'a OperationDescriptor<E::Kind>,
        target: &'a TargetContext<E>,
    ) -> Self {
        let policy = exec.policy.resolve(op, target);
        let retryable = exec.classifier.build_retryable_set(op, target);

        tracing::debug!(
            operation = op.name(),
            target_type = target.type_name(),
            attempts = policy.attempts,
            delay = ?policy.delay,
            retryable = ?retryable,
            declared_non_retryable = ?op.declared_non_retryable(),
            "retry policy resolved"
        );

        Self {
            exec,
            op,
            target,
            policy,
            retryable,
            callback: None,
            index: 0,
            state: RetryState::Attempting,
        }
    }

    pub(crate) fn state(&self) -> RetryState {
        self.state
    }

    /// 1-based number of the current attempt.
    fn attempt(&self) -> u32 {
        self.index.saturating_add(1)
    }

    fn publish(&self, kind: EventKind, decorate: impl FnOnce(Event) -> Event) {
        if self.exec.observers.is_empty() {
            return;
        }
        let ev = Event::new(kind)
            .with_operation(self.op.name())
            .with_attempt(self.attempt());
        self.exec.observers.emit(&decorate(ev));
    }

    /// Called right before the operation runs.
    pub(crate) fn starting(&self) {
        tracing::debug!(
            operation = self.op.name(),
            attempt = self.attempt(),
            of = self.policy.attempts,
            "calling operation"
        );
        self.publish(EventKind::AttemptStarting, |ev| ev);
    }

    /// Called when the operation returned a value.
    pub(crate) fn succeeded(&mut self) {
        self.state = RetryState::Success;
        self.publish(EventKind::Succeeded, |ev| ev);
    }

    /// Classifies a failed attempt and decides the next step.
    pub(crate) fn failed(&mut self, err: E) -> Step<E> {
        let cause = root_cause(err);
        let kind = cause.kind();

        tracing::debug!(
            operation = self.op.name(),
            attempt = self.attempt(),
            kind = ?kind,
            error = %cause,
            "attempt failed"
        );
        self.publish(EventKind::AttemptFailed, |ev| {
            ev.with_failure_kind(kind).with_reason(cause.to_string())
        });

        if !self.exec.classifier.is_retryable(&cause, &self.retryable) {
            self.state = RetryState::Aborted;
            let detail = if self.op.declared_non_retryable().contains(&kind) {
                "declared by operation, not retryable"
            } else {
                "not within retryable kinds"
            };
            tracing::debug!(operation = self.op.name(), kind = ?kind, detail, "will not retry");
            self.publish(EventKind::Aborted, |ev| {
                ev.with_failure_kind(kind).with_reason(detail)
            });
            return Step::Stop(cause);
        }

        if self.index >= self.policy.attempts {
            self.state = RetryState::Exhausted;
            tracing::debug!(
                operation = self.op.name(),
                kind = ?kind,
                attempts = self.policy.attempts,
                "exhausted all attempts"
            );
            self.publish(EventKind::Exhausted, |ev| {
                ev.with_failure_kind(kind).with_reason(cause.to_string())
            });
            return Step::Stop(cause);
        }

        let exec = self.exec;
        let target = self.target;
        let has_callback = self
            .callback
            .get_or_insert_with(|| exec.locator.find_callback(target))
            .is_some();

        let pause = (has_callback || exec.cfg.sleep_without_callback).then_some(self.policy.delay);
        match pause {
            Some(delay) => {
                tracing::debug!(operation = self.op.name(), kind = ?kind, delay = ?delay, "retryable, sleeping");
                self.publish(EventKind::RetryScheduled, |ev| {
                    ev.with_delay(delay).with_reason(cause.to_string())
                });
            }
            None => {
                tracing::debug!(operation = self.op.name(), kind = ?kind, "retryable, no callback, retrying now");
            }
        }

        Step::Retry { cause, pause }
    }

    /// Runs the pre-retry hook (if found) and advances to the next attempt.
    pub(crate) fn prepare_retry(&mut self, cause: &E) {
        if let Some(Some(cb)) = &self.callback {
            tracing::debug!(operation = self.op.name(), "invoking retry callback");
            cb.on_retry(self.op, cause);
            self.publish(EventKind::CallbackInvoked, |ev| ev.with_failure_kind(cause.kind()));
        }
        self.index += 1;
    }
}
