//! # Executor configuration.
//!
//! Provides [`RetryConfig`], the centralized settings of a
//! [`RetryExecutor`](crate::RetryExecutor).
//!
//! ## Sentinel values
//! - `override_depth = 0` → the whole override chain is searched

use std::time::Duration;

/// Configuration for the retry executor.
///
/// ## Field semantics
/// - `default_attempts`: retries used when neither operation nor chain sets them
/// - `default_delay`: delay used when neither operation nor chain sets it
/// - `override_depth`: how many chain layers are searched (`0` = all)
/// - `sleep_without_callback`: also wait `delay` when no pre-retry hook exists
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Retry count when nothing else sets one.
    pub default_attempts: u32,

    /// Delay between attempts when nothing else sets one.
    pub default_delay: Duration,

    /// Number of override layers consulted, nearest first.
    ///
    /// - `0` = every layer of the chain
    /// - `1` = own type only
    /// - `2` = own type, then immediate parent
    pub override_depth: usize,

    /// Whether the inter-attempt delay also applies when no hook is found.
    ///
    /// By default the delay is observed only together with the pre-retry hook:
    /// the executor sleeps, then invokes the hook. Without a hook, retries follow
    /// each other immediately unless this flag is set.
    pub sleep_without_callback: bool,
}

impl RetryConfig {
    /// Returns the override search depth as an `Option`.
    ///
    /// - `None` → search the whole chain
    /// - `Some(n)` → at most `n` layers
    #[inline]
    pub fn override_depth_limit(&self) -> Option<usize> {
        if self.override_depth == 0 {
            None
        } else {
            Some(self.override_depth)
        }
    }
}

impl Default for RetryConfig {
    /// Default configuration:
    ///
    /// - `default_attempts = 3`
    /// - `default_delay = 1s`
    /// - `override_depth = 0` (whole chain)
    /// - `sleep_without_callback = false`
    fn default() -> Self {
        Self {
            default_attempts: 3,
            default_delay: Duration::from_secs(1),
            override_depth: 0,
            sleep_without_callback: false,
        }
    }
}
