//! Retry core: configuration and the attempt loop.
//!
//! The public API of this module is [`RetryExecutor`] (with its builder),
//! [`RetryConfig`] and [`RetryState`].
//!
//! Internal modules:
//! - [`executor`]: drives attempts, waits, and returns the outcome;
//! - [`invocation`]: per-call decision logic shared by the blocking and async loops;
//! - [`builder`]: attaches observers;
//! - [`config`]: defaults and knobs;
//! - [`state`]: the loop's state machine.

mod builder;
mod config;
mod executor;
mod invocation;
mod state;

pub use builder::RetryExecutorBuilder;
pub use config::RetryConfig;
pub use executor::RetryExecutor;
pub use state::RetryState;
