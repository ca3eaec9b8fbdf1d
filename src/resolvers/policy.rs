//! # Attempt/delay policy resolution.
//!
//! [`PolicyResolver`] computes the effective [`RetryPolicy`] of one invocation.
//! Both fields are resolved the same way and independently of each other:
//!
//! ```text
//! operation value ── Some(v) ──► v
//!        │
//!       None
//!        ▼
//! override chain (nearest first, within depth) ── first Some(v) ──► v
//!        │
//!      absent
//!        ▼
//! configured default
//! ```
//!
//! Absent overrides are a normal case and never raise an error.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{Fault, OperationDescriptor, PolicyResolver, RetryConfig, TargetContext, TypeOverrides};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Busy }
//!
//! let resolver = PolicyResolver::new(&RetryConfig::default());
//! let target = TargetContext::<Fault<Kind>>::new(TypeOverrides::new("Svc").with_attempts(5));
//!
//! // Unset on the operation → the type-level override applies.
//! let op = OperationDescriptor::<Kind>::new("svc::call");
//! assert_eq!(resolver.resolve_attempts(&op, &target), 5);
//!
//! // Explicit on the operation → always wins.
//! let op = op.with_attempts(1);
//! assert_eq!(resolver.resolve_attempts(&op, &target), 1);
//! ```

use std::time::Duration;

use crate::core::RetryConfig;
use crate::failure::Failure;
use crate::operation::{OperationDescriptor, TargetContext};

/// Effective retry policy of one invocation.
///
/// `attempts` is the number of **retries**: the operation runs at most
/// `attempts + 1` times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the first call.
    pub attempts: u32,
    /// Delay before each retry.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Total number of calls the policy allows.
    #[inline]
    pub fn max_calls(&self) -> u64 {
        u64::from(self.attempts) + 1
    }
}

/// Resolves attempts and delay from operation, override chain and defaults.
#[derive(Clone, Debug)]
pub struct PolicyResolver {
    default_attempts: u32,
    default_delay: Duration,
    depth: Option<usize>,
}

impl PolicyResolver {
    /// Creates a resolver using the defaults and chain depth of `cfg`.
    pub fn new(cfg: &RetryConfig) -> Self {
        Self {
            default_attempts: cfg.default_attempts,
            default_delay: cfg.default_delay,
            depth: cfg.override_depth_limit(),
        }
    }

    /// Resolves the retry count.
    pub fn resolve_attempts<E: Failure>(
        &self,
        op: &OperationDescriptor<E::Kind>,
        target: &TargetContext<E>,
    ) -> u32 {
        if let Some(n) = op.attempts() {
            tracing::trace!(operation = op.name(), attempts = n, "attempts set on operation");
            return n;
        }
        match target.lookup(self.depth, |layer| layer.attempts()) {
            Some((n, from)) => {
                tracing::trace!(operation = op.name(), attempts = n, from, "attempts overridden by type");
                n
            }
            None => self.default_attempts,
        }
    }

    /// Resolves the delay between attempts.
    pub fn resolve_delay<E: Failure>(
        &self,
        op: &OperationDescriptor<E::Kind>,
        target: &TargetContext<E>,
    ) -> Duration {
        if let Some(d) = op.delay() {
            tracing::trace!(operation = op.name(), delay = ?d, "delay set on operation");
            return d;
        }
        match target.lookup(self.depth, |layer| layer.delay()) {
            Some((d, from)) => {
                tracing::trace!(operation = op.name(), delay = ?d, from, "delay overridden by type");
                d
            }
            None => self.default_delay,
        }
    }

    /// Resolves both fields.
    pub fn resolve<E: Failure>(
        &self,
        op: &OperationDescriptor<E::Kind>,
        target: &TargetContext<E>,
    ) -> RetryPolicy {
        RetryPolicy {
            attempts: self.resolve_attempts(op, target),
            delay: self.resolve_delay(op, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::Fault;
    use crate::operation::TypeOverrides;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Busy,
    }

    type Layer = TypeOverrides<Fault<Kind>>;

    fn resolver() -> PolicyResolver {
        PolicyResolver::new(&RetryConfig {
            default_attempts: 3,
            default_delay: Duration::from_millis(100),
            ..RetryConfig::default()
        })
    }

    fn op() -> OperationDescriptor<Kind> {
        OperationDescriptor::new("op").retry_on(Kind::Busy)
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let target = TargetContext::<Fault<Kind>>::empty();
        let policy = resolver().resolve(&op(), &target);
        assert_eq!(
            policy,
            RetryPolicy {
                attempts: 3,
                delay: Duration::from_millis(100)
            }
        );
        assert_eq!(policy.max_calls(), 4);
    }

    #[test]
    fn test_operation_value_wins_over_any_override() {
        let target = TargetContext::new(
            Layer::new("Own")
                .with_attempts(9)
                .with_delay(Duration::from_secs(9)),
        );
        for explicit in [0, 1, 3, 7] {
            let op = op().with_attempts(explicit).with_delay(Duration::ZERO);
            let policy = resolver().resolve(&op, &target);
            assert_eq!(policy.attempts, explicit);
            assert_eq!(policy.delay, Duration::ZERO);
        }
    }

    #[test]
    fn test_explicit_value_equal_to_default_still_wins() {
        let target = TargetContext::new(Layer::new("Own").with_attempts(9));
        let op = op().with_attempts(3);
        assert_eq!(resolver().resolve_attempts(&op, &target), 3);
    }

    #[test]
    fn test_own_type_override_used_when_unset() {
        let target = TargetContext::new(Layer::new("Own").with_attempts(5))
            .with_parent(Layer::new("Parent").with_attempts(8));
        assert_eq!(resolver().resolve_attempts(&op(), &target), 5);
    }

    #[test]
    fn test_parent_override_used_when_own_absent() {
        let target = TargetContext::new(Layer::new("Own"))
            .with_parent(Layer::new("Parent").with_delay(Duration::from_millis(40)));
        assert_eq!(
            resolver().resolve_delay(&op(), &target),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn test_fields_resolve_independently() {
        let target = TargetContext::new(Layer::new("Own").with_delay(Duration::from_millis(7)))
            .with_parent(Layer::new("Parent").with_attempts(2));
        let policy = resolver().resolve(&op(), &target);
        assert_eq!(policy.attempts, 2);
        assert_eq!(policy.delay, Duration::from_millis(7));
    }

    #[test]
    fn test_depth_limits_ancestor_search() {
        let cfg = RetryConfig {
            default_attempts: 1,
            override_depth: 2,
            ..RetryConfig::default()
        };
        let target = TargetContext::new(Layer::new("Own"))
            .with_parent(Layer::new("Parent"))
            .with_parent(Layer::new("Grandparent").with_attempts(6));

        assert_eq!(PolicyResolver::new(&cfg).resolve_attempts(&op(), &target), 1);
        assert_eq!(resolver().resolve_attempts(&op(), &target), 6);
    }
}
