//! Retry resolvers.
//!
//! This module groups the read-only lookups the executor performs once per
//! invocation, before and during the attempt loop.
//!
//! ## Contents
//! - [`PolicyResolver`]      effective attempts/delay ([`RetryPolicy`])
//! - [`ExceptionClassifier`] retryable kind set ([`RetryableSet`]) and membership test
//! - [`CallbackLocator`]     pre-retry hook along the override chain
//!
//! ## Quick wiring
//! ```text
//! RetryExecutor::execute(op, target, call)
//!      ├─► PolicyResolver::resolve(op, target)              once
//!      ├─► ExceptionClassifier::build_retryable_set(..)     once
//!      └─► CallbackLocator::find_callback(target)           lazily, at most once
//! ```
//!
//! ## Precedence
//! - Operation-level values (`Some`) always win.
//! - Otherwise the first layer of the override chain (nearest first) that sets
//!   the field wins, within [`RetryConfig::override_depth`](crate::RetryConfig).
//! - Otherwise the configured default applies.
//!
//! All resolvers only read immutable inputs and are `Send + Sync`; one instance can
//! serve any number of concurrent invocations.

mod classifier;
mod locator;
mod policy;

pub use classifier::{ExceptionClassifier, RetryableSet};
pub use locator::CallbackLocator;
pub use policy::{PolicyResolver, RetryPolicy};
