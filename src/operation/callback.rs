//! # Pre-retry hook.
//!
//! A [`RetryCallback`] runs after the inter-attempt delay and right before the
//! next attempt. It receives the operation descriptor and the root cause of the
//! failure that triggered the retry.
//!
//! Any `Fn(&OperationDescriptor<K>, &E)` closure that is `Send + Sync + 'static`
//! is a callback; [`CallbackHandle`] is the shared form stored on a
//! [`TypeOverrides`](crate::TypeOverrides) layer.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use retryvisor::{CallbackHandle, Fault, OperationDescriptor};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Busy }
//!
//! let hook: CallbackHandle<Fault<Kind>> =
//!     Arc::new(|op: &OperationDescriptor<Kind>, err: &Fault<Kind>| {
//!         eprintln!("retrying {} after {err}", op.name());
//!     });
//! # let _ = hook;
//! ```

use std::sync::Arc;

use crate::failure::Failure;
use crate::operation::OperationDescriptor;

/// Hook invoked before each retry of an operation.
pub trait RetryCallback<E: Failure>: Send + Sync + 'static {
    /// Called with the operation and the root cause that is being retried.
    fn on_retry(&self, operation: &OperationDescriptor<E::Kind>, cause: &E);
}

impl<E, F> RetryCallback<E> for F
where
    E: Failure,
    F: Fn(&OperationDescriptor<E::Kind>, &E) + Send + Sync + 'static,
{
    fn on_retry(&self, operation: &OperationDescriptor<E::Kind>, cause: &E) {
        self(operation, cause)
    }
}

/// Shared handle to a pre-retry hook.
pub type CallbackHandle<E> = Arc<dyn RetryCallback<E>>;
