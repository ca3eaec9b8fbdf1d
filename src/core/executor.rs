//! # RetryExecutor: the attempt loop.
//!
//! Wraps one fallible operation call with:
//! - attempts/delay per [`PolicyResolver`],
//! - retryability per [`ExceptionClassifier`] (exact kind of the root cause),
//! - an optional pre-retry hook per [`CallbackLocator`],
//! - event publishing to the registered observers.
//!
//! ## Architecture
//! ```text
//! execute(op, target, call)
//!
//! resolve policy (N, D) + retryable set
//! for i in 0..=N {
//!   ├─► publish AttemptStarting
//!   ├─► call()
//!   │     ├─ Ok(v)  ─► Success: publish Succeeded, return Ok(v)
//!   │     └─ Err(e) ─► root = root_cause(e)
//!   │                  ├─ not retryable  ─► Aborted:   return Err(root)
//!   │                  ├─ i < N          ─► locate hook (once)
//!   │                  │                    if hook: sleep(D), hook(op, &root)
//!   │                  └─ i == N         ─► Exhausted: return Err(root)
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** (never parallel) on the caller's thread of control.
//! - [`RetryExecutor::execute`] waits with a **blocking** sleep;
//!   [`RetryExecutor::execute_async`] awaits `tokio::time::sleep` instead.
//!   Decisions are identical in both.
//! - The success value is passed through unmodified; failures are always returned
//!   as their root cause, never wrapped.
//! - The executor keeps no state between invocations and is `Send + Sync`; share
//!   one instance across threads freely.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{Fault, OperationDescriptor, RetryConfig, RetryExecutor, TargetContext};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Busy }
//!
//! let exec = RetryExecutor::new(RetryConfig::default());
//! let op = OperationDescriptor::new("inventory::reserve")
//!     .with_attempts(2)
//!     .with_delay(Duration::from_millis(1))
//!     .retry_on(Kind::Busy);
//! let target: TargetContext<Fault<Kind>> = TargetContext::empty();
//!
//! let mut calls = 0;
//! let out = exec.execute(&op, &target, || {
//!     calls += 1;
//!     if calls < 3 { Err(Fault::new(Kind::Busy, "locked")) } else { Ok(calls) }
//! });
//! assert_eq!(out, Ok(3));
//! ```

use std::fmt;
use std::future::Future;

use crate::core::builder::RetryExecutorBuilder;
use crate::core::invocation::{Invocation, Step};
use crate::core::RetryConfig;
use crate::failure::Failure;
use crate::observers::ObserverSet;
use crate::operation::{OperationDescriptor, TargetContext};
use crate::resolvers::{CallbackLocator, ExceptionClassifier, PolicyResolver, RetryPolicy};

/// Retry interceptor shared by every decorated operation.
#[derive(Debug)]
pub struct RetryExecutor {
    pub(super) cfg: RetryConfig,
    pub(super) policy: PolicyResolver,
    pub(super) classifier: ExceptionClassifier,
    pub(super) locator: CallbackLocator,
    pub(super) observers: ObserverSet,
}

impl RetryExecutor {
    /// Creates an executor without observers.
    pub fn new(cfg: RetryConfig) -> Self {
        Self::builder(cfg).build()
    }

    /// Returns a builder to attach observers.
    pub fn builder(cfg: RetryConfig) -> RetryExecutorBuilder {
        RetryExecutorBuilder::new(cfg)
    }

    pub(super) fn from_parts(cfg: RetryConfig, observers: ObserverSet) -> Self {
        let depth = cfg.override_depth_limit();
        Self {
            policy: PolicyResolver::new(&cfg),
            classifier: ExceptionClassifier::new(depth),
            locator: CallbackLocator::new(depth),
            observers,
            cfg,
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &RetryConfig {
        &self.cfg
    }

    /// Resolves the policy an invocation of `op` on `target` would use.
    pub fn resolve_policy<E: Failure>(
        &self,
        op: &OperationDescriptor<E::Kind>,
        target: &TargetContext<E>,
    ) -> RetryPolicy {
        self.policy.resolve(op, target)
    }

    /// Runs `call` until it succeeds, fails with a non-retryable root cause, or
    /// runs out of retries. Waits between attempts block the current thread.
    pub fn execute<T, E, F>(
        &self,
        op: &OperationDescriptor<E::Kind>,
        target: &TargetContext<E>,
        mut call: F,
    ) -> Result<T, E>
    where
        E: Failure + fmt::Display,
        F: FnMut() -> Result<T, E>,
    {
        let mut inv = Invocation::begin(self, op, target);
        loop {
            inv.starting();
            match call() {
                Ok(value) => {
                    inv.succeeded();
                    return Ok(value);
                }
                Err(err) => match inv.failed(err) {
                    Step::Stop(cause) => {
                        debug_assert!(inv.state().is_terminal());
                        return Err(cause);
                    }
                    Step::Retry { cause, pause } => {
                        if let Some(delay) = pause {
                            std::thread::sleep(delay);
                        }
                        inv.prepare_retry(&cause);
                    }
                },
            }
        }
    }

    /// Async flavour of [`execute`](Self::execute): `call` produces a fresh future
    /// per attempt and waits use `tokio::time::sleep`.
    ///
    /// Attempts are still strictly sequential; the invocation does nothing else
    /// while waiting.
    pub async fn execute_async<T, E, F, Fut>(
        &self,
        op: &OperationDescriptor<E::Kind>,
        target: &TargetContext<E>,
        mut call: F,
    ) -> Result<T, E>
    where
        E: Failure + fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut inv = Invocation::begin(self, op, target);
        loop {
            inv.starting();
            match call().await {
                Ok(value) => {
                    inv.succeeded();
                    return Ok(value);
                }
                Err(err) => match inv.failed(err) {
                    Step::Stop(cause) => {
                        debug_assert!(inv.state().is_terminal());
                        return Err(cause);
                    }
                    Step::Retry { cause, pause } => {
                        if let Some(delay) = pause {
                            tokio::time::sleep(delay).await;
                        }
                        inv.prepare_retry(&cause);
                    }
                },
            }
        }
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use super::*;
    use crate::events::{Event, EventKind};
    use crate::failure::Fault;
    use crate::observers::Observe;
    use crate::operation::TypeOverrides;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Busy,
        Timeout,
        Invalid,
    }

    type TestFault = Fault<Kind>;
    type Layer = TypeOverrides<TestFault>;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Event>>);

    impl Recorder {
        fn count(&self, kind: EventKind) -> usize {
            self.0.lock().unwrap().iter().filter(|e| e.kind == kind).count()
        }

        fn kinds(&self) -> Vec<EventKind> {
            self.0.lock().unwrap().iter().map(|e| e.kind).collect()
        }
    }

    impl Observe for Recorder {
        fn on_event(&self, event: &Event) {
            self.0.lock().unwrap().push(event.clone());
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    /// Hook recording every `(operation, cause)` it receives.
    fn recording_hook(log: Arc<Mutex<Vec<(String, TestFault)>>>) -> Layer {
        Layer::new("Service").with_callback(move |op: &OperationDescriptor<Kind>, err: &TestFault| {
            log.lock().unwrap().push((op.name().to_string(), err.clone()));
        })
    }

    fn exec_with(rec: &Arc<Recorder>) -> RetryExecutor {
        RetryExecutor::builder(RetryConfig::default())
            .with_observer(rec.clone())
            .build()
    }

    #[test]
    fn test_zero_attempts_calls_once_on_retryable_failure() {
        let rec = Arc::new(Recorder::default());
        let exec = exec_with(&rec);
        let hook_log = Arc::new(Mutex::new(Vec::new()));
        let target = TargetContext::new(recording_hook(hook_log.clone()));
        let op = OperationDescriptor::new("op").with_attempts(0).retry_on(Kind::Busy);

        let mut calls = 0;
        let res: Result<(), TestFault> = exec.execute(&op, &target, || {
            calls += 1;
            Err(Fault::new(Kind::Busy, "busy"))
        });

        assert_eq!(calls, 1);
        assert_eq!(res, Err(Fault::new(Kind::Busy, "busy")));
        assert!(hook_log.lock().unwrap().is_empty());
        assert_eq!(rec.count(EventKind::RetryScheduled), 0);
        assert_eq!(rec.count(EventKind::Exhausted), 1);
    }

    #[test]
    fn test_zero_attempts_calls_once_on_non_retryable_failure() {
        let exec = RetryExecutor::default();
        let target: TargetContext<TestFault> = TargetContext::empty();
        let op = OperationDescriptor::new("op").with_attempts(0).retry_on(Kind::Busy);

        let mut calls = 0;
        let res: Result<(), TestFault> = exec.execute(&op, &target, || {
            calls += 1;
            Err(Fault::new(Kind::Invalid, "bad input"))
        });

        assert_eq!(calls, 1);
        assert_eq!(res.unwrap_err().kind(), Kind::Invalid);
    }

    #[test]
    fn test_always_failing_retryable_runs_n_plus_one_times() {
        let rec = Arc::new(Recorder::default());
        let exec = exec_with(&rec);
        let hook_log = Arc::new(Mutex::new(Vec::new()));
        let target = TargetContext::new(recording_hook(hook_log.clone()));
        let op = OperationDescriptor::new("op")
            .with_attempts(3)
            .with_delay(Duration::from_millis(1))
            .retry_on(Kind::Timeout);

        let mut calls = 0u32;
        let res: Result<(), TestFault> = exec.execute(&op, &target, || {
            calls += 1;
            Err(Fault::new(Kind::Timeout, format!("timeout #{calls}")))
        });

        assert_eq!(calls, 4);
        assert_eq!(rec.count(EventKind::RetryScheduled), 3);
        assert_eq!(rec.count(EventKind::CallbackInvoked), 3);
        assert_eq!(hook_log.lock().unwrap().len(), 3);
        // The last root cause is returned.
        assert_eq!(res.unwrap_err().message(), "timeout #4");
        assert_eq!(rec.kinds().last(), Some(&EventKind::Exhausted));
    }

    #[test]
    fn test_non_retryable_aborts_immediately_mid_loop() {
        let rec = Arc::new(Recorder::default());
        let exec = exec_with(&rec);
        let hook_log = Arc::new(Mutex::new(Vec::new()));
        let target = TargetContext::new(recording_hook(hook_log.clone()));
        let op = OperationDescriptor::new("op")
            .with_attempts(5)
            .with_delay(Duration::from_millis(1))
            .retry_on(Kind::Busy)
            .declares([Kind::Busy, Kind::Invalid]);

        let mut calls = 0;
        let res: Result<(), TestFault> = exec.execute(&op, &target, || {
            calls += 1;
            if calls < 3 {
                Err(Fault::new(Kind::Busy, "busy"))
            } else {
                Err(Fault::new(Kind::Invalid, "rejected"))
            }
        });

        assert_eq!(calls, 3);
        assert_eq!(res.unwrap_err().kind(), Kind::Invalid);
        // Two retries happened before the abort, none after it.
        assert_eq!(rec.count(EventKind::RetryScheduled), 2);
        assert_eq!(hook_log.lock().unwrap().len(), 2);

        let events = rec.0.lock().unwrap();
        let aborted = events.iter().find(|e| e.kind == EventKind::Aborted).unwrap();
        assert_eq!(aborted.attempt, Some(3));
        assert_eq!(aborted.reason.as_deref(), Some("declared by operation, not retryable"));
    }

    #[test]
    fn test_root_cause_is_returned_not_the_wrapper() {
        let exec = RetryExecutor::default();
        let target: TargetContext<TestFault> = TargetContext::empty();
        let op = OperationDescriptor::new("op").with_attempts(1).retry_on(Kind::Busy);

        let mut calls = 0;
        let res: Result<(), TestFault> = exec.execute(&op, &target, || {
            calls += 1;
            // The wrapper kind is not retryable but the root cause is.
            Err(Fault::wrap(Kind::Invalid, "wrapper", Fault::new(Kind::Busy, "deep")))
        });

        assert_eq!(calls, 2);
        let err = res.unwrap_err();
        assert_eq!(err.kind(), Kind::Busy);
        assert_eq!(err.message(), "deep");
    }

    #[test]
    fn test_scenario_two_failures_then_success() {
        let rec = Arc::new(Recorder::default());
        let exec = exec_with(&rec);
        let hook_log = Arc::new(Mutex::new(Vec::new()));
        let target = TargetContext::new(recording_hook(hook_log.clone()));
        let op = OperationDescriptor::new("orders::fetch")
            .with_attempts(2)
            .with_delay(Duration::from_millis(10))
            .retry_on(Kind::Busy);

        let start = Instant::now();
        let mut calls = 0;
        let res = exec.execute(&op, &target, || {
            calls += 1;
            if calls <= 2 {
                Err(Fault::new(Kind::Busy, format!("busy #{calls}")))
            } else {
                Ok("payload")
            }
        });

        assert_eq!(res, Ok("payload"));
        assert_eq!(calls, 3);
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(rec.count(EventKind::RetryScheduled), 2);
        assert!(
            rec.0
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.kind == EventKind::RetryScheduled)
                .all(|e| e.delay_ms == Some(10))
        );

        let hooks = hook_log.lock().unwrap();
        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks[0], ("orders::fetch".to_string(), Fault::new(Kind::Busy, "busy #1")));
        assert_eq!(hooks[1], ("orders::fetch".to_string(), Fault::new(Kind::Busy, "busy #2")));
        assert_eq!(rec.kinds().last(), Some(&EventKind::Succeeded));
    }

    #[test]
    fn test_scenario_non_retryable_with_one_attempt() {
        let rec = Arc::new(Recorder::default());
        let exec = exec_with(&rec);
        let hook_log = Arc::new(Mutex::new(Vec::new()));
        let target = TargetContext::new(recording_hook(hook_log.clone()));
        let op = OperationDescriptor::new("op")
            .with_attempts(1)
            .with_delay(Duration::from_millis(50))
            .retry_on(Kind::Busy);

        let start = Instant::now();
        let mut calls = 0;
        let res: Result<(), TestFault> = exec.execute(&op, &target, || {
            calls += 1;
            Err(Fault::new(Kind::Timeout, "slow"))
        });

        assert_eq!(calls, 1);
        assert_eq!(res, Err(Fault::new(Kind::Timeout, "slow")));
        assert!(start.elapsed() < Duration::from_millis(50));
        assert!(hook_log.lock().unwrap().is_empty());
        assert_eq!(
            rec.kinds(),
            vec![EventKind::AttemptStarting, EventKind::AttemptFailed, EventKind::Aborted]
        );
    }

    #[test]
    fn test_no_sleep_without_callback_by_default() {
        let rec = Arc::new(Recorder::default());
        let exec = exec_with(&rec);
        let target: TargetContext<TestFault> = TargetContext::new(Layer::new("Plain"));
        let op = OperationDescriptor::new("op")
            .with_attempts(2)
            .with_delay(Duration::from_secs(5))
            .retry_on(Kind::Busy);

        let start = Instant::now();
        let mut calls = 0;
        let res: Result<(), TestFault> = exec.execute(&op, &target, || {
            calls += 1;
            Err(Fault::new(Kind::Busy, "busy"))
        });

        assert!(res.is_err());
        assert_eq!(calls, 3);
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(rec.count(EventKind::RetryScheduled), 0);
    }

    #[test]
    fn test_sleep_without_callback_when_configured() {
        let rec = Arc::new(Recorder::default());
        let exec = RetryExecutor::builder(RetryConfig {
            sleep_without_callback: true,
            ..RetryConfig::default()
        })
        .with_observer(rec.clone())
        .build();
        let target: TargetContext<TestFault> = TargetContext::empty();
        let op = OperationDescriptor::new("op")
            .with_attempts(2)
            .with_delay(Duration::from_millis(5))
            .retry_on(Kind::Busy);

        let start = Instant::now();
        let res: Result<(), TestFault> = exec.execute(&op, &target, || Err(Fault::new(Kind::Busy, "busy")));

        assert!(res.is_err());
        assert!(start.elapsed() >= Duration::from_millis(10));
        assert_eq!(rec.count(EventKind::RetryScheduled), 2);
        assert_eq!(rec.count(EventKind::CallbackInvoked), 0);
    }

    #[test]
    fn test_hook_is_located_lazily() {
        let exec = RetryExecutor::default();
        let ran = Arc::new(AtomicUsize::new(0));
        let flag = ran.clone();
        let target = TargetContext::new(Layer::new("Svc").with_callback(
            move |_: &OperationDescriptor<Kind>, _: &TestFault| {
                flag.fetch_add(1, Ordering::SeqCst);
            },
        ));
        let op = OperationDescriptor::new("op").with_attempts(3).retry_on(Kind::Busy);

        assert_eq!(exec.execute(&op, &target, || Ok::<_, TestFault>(42)), Ok(42));

        let res: Result<(), TestFault> =
            exec.execute(&op, &target, || Err(Fault::new(Kind::Invalid, "nope")));
        assert_eq!(res.unwrap_err().kind(), Kind::Invalid);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_type_level_overrides_drive_the_loop() {
        let exec = RetryExecutor::default();
        let counter = Arc::new(AtomicUsize::new(0));
        let hooks = counter.clone();
        let target = TargetContext::new(Layer::new("OrderService"))
            .with_parent(
                Layer::new("BaseService")
                    .with_attempts(1)
                    .with_delay(Duration::from_millis(1))
                    .with_retry_on([Kind::Timeout])
                    .with_callback(move |_: &OperationDescriptor<Kind>, _: &TestFault| {
                        hooks.fetch_add(1, Ordering::SeqCst);
                    }),
            );
        // Nothing set on the operation itself.
        let op: OperationDescriptor<Kind> = OperationDescriptor::new("op");

        let mut calls = 0;
        let res: Result<(), TestFault> = exec.execute(&op, &target, || {
            calls += 1;
            Err(Fault::new(Kind::Timeout, "slow"))
        });

        assert!(res.is_err());
        assert_eq!(calls, 2);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(
            exec.resolve_policy(&op, &target),
            RetryPolicy { attempts: 1, delay: Duration::from_millis(1) }
        );
    }

    #[test]
    fn test_concurrent_invocations_are_independent() {
        let exec = Arc::new(RetryExecutor::default());
        let op = Arc::new(
            OperationDescriptor::new("shared")
                .with_attempts(4)
                .retry_on(Kind::Busy),
        );

        std::thread::scope(|s| {
            for fail_times in 0..4u32 {
                let exec = exec.clone();
                let op = op.clone();
                s.spawn(move || {
                    let target: TargetContext<TestFault> = TargetContext::empty();
                    let mut calls = 0u32;
                    let res = exec.execute(&*op, &target, || {
                        calls += 1;
                        if calls <= fail_times {
                            Err(Fault::new(Kind::Busy, "busy"))
                        } else {
                            Ok(calls)
                        }
                    });
                    assert_eq!(res, Ok(fail_times + 1));
                });
            }
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_scenario_two_failures_then_success() {
        let rec = Arc::new(Recorder::default());
        let exec = exec_with(&rec);
        let hook_log = Arc::new(Mutex::new(Vec::new()));
        let target = TargetContext::new(recording_hook(hook_log.clone()));
        let op = OperationDescriptor::new("orders::fetch")
            .with_attempts(2)
            .with_delay(Duration::from_millis(10))
            .retry_on(Kind::Busy);

        let calls = Arc::new(AtomicUsize::new(0));
        let start = tokio::time::Instant::now();
        let res = exec
            .execute_async(&op, &target, || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if n <= 2 {
                        Err(Fault::new(Kind::Busy, "busy"))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(res, Ok(3));
        // Paused clock: exactly two sleeps of 10ms.
        assert_eq!(start.elapsed(), Duration::from_millis(20));
        assert_eq!(rec.count(EventKind::RetryScheduled), 2);
        assert_eq!(hook_log.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_always_failing_is_exhausted() {
        let rec = Arc::new(Recorder::default());
        let exec = exec_with(&rec);
        let hook_log = Arc::new(Mutex::new(Vec::new()));
        let target = TargetContext::new(recording_hook(hook_log.clone()));
        let op = OperationDescriptor::new("op")
            .with_attempts(3)
            .with_delay(Duration::from_millis(5))
            .retry_on(Kind::Timeout);

        let calls = AtomicUsize::new(0);
        let start = tokio::time::Instant::now();
        let res: Result<(), TestFault> = exec
            .execute_async(&op, &target, || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err(Fault::new(Kind::Timeout, format!("timeout #{n}"))) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(res.unwrap_err().message(), "timeout #4");
        assert_eq!(start.elapsed(), Duration::from_millis(15));
        assert_eq!(rec.count(EventKind::RetryScheduled), 3);
        assert_eq!(hook_log.lock().unwrap().len(), 3);
        assert_eq!(rec.kinds().last(), Some(&EventKind::Exhausted));
    }

    #[tokio::test]
    async fn test_async_non_retryable_aborts() {
        let exec = RetryExecutor::default();
        let target: TargetContext<TestFault> = TargetContext::empty();
        let op = OperationDescriptor::new("op").with_attempts(3).retry_on(Kind::Busy);

        let calls = AtomicUsize::new(0);
        let res: Result<(), TestFault> = exec
            .execute_async(&op, &target, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Fault::new(Kind::Invalid, "bad")) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(res.unwrap_err().kind(), Kind::Invalid);
    }
}
