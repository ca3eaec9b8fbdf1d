//! Retry events.
//!
//! This module holds the event **data model** emitted by the executor during
//! each invocation and delivered to registered observers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publisher**: `RetryExecutor` (one event stream per invocation, emitted inline).
//! - **Consumers**: [`Observe`](crate::Observe) implementations held by the
//!   executor's [`ObserverSet`](crate::ObserverSet).

mod event;

pub use event::{Event, EventKind};
