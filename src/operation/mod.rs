//! # Operation and target descriptions.
//!
//! This module provides what the interception layer hands to the executor:
//! - [`OperationDescriptor`] identity and operation-level retry declarations
//! - [`TargetContext`] ordered chain of type-level overrides (nearest first)
//! - [`TypeOverrides`] one layer of that chain
//! - [`RetryCallback`] pre-retry hook trait, with [`CallbackHandle`] as the shared handle

mod callback;
mod descriptor;
mod target;

pub use callback::{CallbackHandle, RetryCallback};
pub use descriptor::OperationDescriptor;
pub use target::{FIELD_ATTEMPTS, FIELD_DELAY_MS, FIELD_EXCEPTIONS, TargetContext, TypeOverrides};
