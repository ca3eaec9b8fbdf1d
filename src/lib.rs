//! # retryvisor
//!
//! **Retryvisor** is a small retry interceptor for fallible operations.
//!
//! It wraps a call and, on failure, decides whether to call again based on a
//! resolved retry policy and on the **exact kind** of the failure's root cause.
//! Policies are declared on the operation and can be overridden per type, through
//! an ordered override chain (own type, then parent, ...). An optional hook runs
//! right before each retry.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   interception layer (outside this crate)
//!        │  OperationDescriptor + TargetContext + call
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  RetryExecutor                                                    │
//! │  - PolicyResolver       (attempts, delay)            once         │
//! │  - ExceptionClassifier  (retryable kind set)         once         │
//! │  - CallbackLocator      (pre-retry hook)             lazily, once │
//! │  - ObserverSet          (event fan-out)                           │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼
//!   call() ─► Ok ─────────────────────────────► Success   (value passed through)
//!        └──► Err ─► root cause ─► not retryable ─► Aborted  (root cause returned)
//!                               ─► retries left  ─► sleep + hook, call again
//!                               ─► none left     ─► Exhausted (root cause returned)
//! ```
//!
//! ### Precedence
//! ```text
//! operation value (Some)  >  override chain, nearest first  >  RetryConfig default
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                                  |
//! |-------------------|--------------------------------------------------------------|-----------------------------------------------------|
//! | **Execution**     | Blocking and tokio attempt loops.                            | [`RetryExecutor`], [`RetryState`]                   |
//! | **Declarations**  | Operation-level and type-level retry settings.               | [`OperationDescriptor`], [`TargetContext`], [`TypeOverrides`] |
//! | **Classification**| Exact kind matching on the root cause.                       | [`Failure`], [`Fault`], [`RetryableSet`]            |
//! | **Hooks**         | Code run before each retry.                                  | [`RetryCallback`], [`CallbackHandle`]               |
//! | **Events**        | Observe attempts, retries and outcomes.                      | [`Observe`], [`Event`], [`EventKind`]               |
//! | **Errors**        | Typed configuration errors.                                  | [`ConfigError`]                                     |
//! | **Configuration** | Defaults, chain depth, waiting without a hook.               | [`RetryConfig`]                                     |
//!
//! ## Known sharp edge
//! Classification uses **exact** kind equality: declaring a broad kind does not make
//! "more specific" failures retryable. List every concrete kind that should retry.
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{
//!     Fault, OperationDescriptor, RetryConfig, RetryExecutor, TargetContext, TypeOverrides,
//! };
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Timeout, Invalid }
//!
//! let exec = RetryExecutor::new(RetryConfig::default());
//!
//! // Type-level defaults for everything `OrderService` does.
//! let target = TargetContext::new(
//!     TypeOverrides::<Fault<Kind>>::new("OrderService")
//!         .with_attempts(2)
//!         .with_delay(Duration::from_millis(1))
//!         .with_callback(|op: &OperationDescriptor<Kind>, err: &Fault<Kind>| {
//!             eprintln!("retrying {} after {err}", op.name());
//!         }),
//! );
//!
//! // The operation only declares what it retries on.
//! let op = OperationDescriptor::new("orders::fetch").retry_on(Kind::Timeout);
//!
//! let mut calls = 0;
//! let order = exec.execute(&op, &target, || {
//!     calls += 1;
//!     if calls == 1 { Err(Fault::new(Kind::Timeout, "upstream slow")) } else { Ok("order-42") }
//! });
//! assert_eq!(order, Ok("order-42"));
//!
//! // Non-retryable kinds come back immediately, unwrapped.
//! let res: Result<(), _> = exec.execute(&op, &target, || {
//!     Err(Fault::wrap(Kind::Timeout, "fetch failed", Fault::new(Kind::Invalid, "bad id")))
//! });
//! assert_eq!(res.unwrap_err().message(), "bad id");
//! ```
mod core;
mod error;
mod events;
mod failure;
mod observers;
mod operation;
mod resolvers;

// ---- Public re-exports ----

pub use core::{RetryConfig, RetryExecutor, RetryExecutorBuilder, RetryState};
pub use error::ConfigError;
pub use events::{Event, EventKind};
pub use failure::{Failure, Fault, root_cause};
pub use observers::{Observe, ObserverSet};
pub use operation::{
    CallbackHandle, FIELD_ATTEMPTS, FIELD_DELAY_MS, FIELD_EXCEPTIONS, OperationDescriptor,
    RetryCallback, TargetContext, TypeOverrides,
};
pub use resolvers::{CallbackLocator, ExceptionClassifier, PolicyResolver, RetryPolicy, RetryableSet};

// Optional: expose a simple built-in stdout observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
