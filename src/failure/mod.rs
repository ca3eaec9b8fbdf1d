//! Failure model: kind tags and cause chains.
//!
//! This module groups what the executor needs to know about an error:
//! which **kind** it is (for exact-tag classification) and what it **wraps**
//! (to find the root cause that is classified and returned to the caller).
//!
//! ## Contents
//! - [`Failure`] kind tag + cause-chain access for any error type
//! - [`root_cause`] descends the chain to its deepest cause
//! - [`Fault`] ready-made failure carrying a kind tag, a message and an optional cause
//!
//! ## Quick wiring
//! ```text
//! operation() ──► Err(e) ──► root_cause(e) ──► kind() ──► RetryableSet::contains
//! ```

mod cause;
mod fault;

pub use cause::{Failure, root_cause};
pub use fault::Fault;
