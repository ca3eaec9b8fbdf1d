//! # Failure classification.
//!
//! [`ExceptionClassifier`] builds the [`RetryableSet`] of one invocation and tests
//! root causes against it.
//!
//! The set is the union of:
//! - the operation's retryable kinds;
//! - the kinds of the first override layer (within depth) that declares a list.
//!
//! Membership is **exact kind equality**. A failure is retryable only if its own
//! kind tag was declared; declaring a broader kind does not cover more specific
//! ones: every kind that should be retried has to be listed explicitly.

use std::collections::HashSet;
use std::hash::Hash;

use crate::failure::Failure;
use crate::operation::{OperationDescriptor, TargetContext};

/// Retryable failure kinds of one invocation, deduplicated.
#[derive(Clone, Debug)]
pub struct RetryableSet<K> {
    kinds: HashSet<K>,
}

impl<K: Eq + Hash> PartialEq for RetryableSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.kinds == other.kinds
    }
}

impl<K: Eq + Hash> Eq for RetryableSet<K> {}

impl<K: Copy + Eq + Hash> RetryableSet<K> {
    /// Builds a set from any kinds.
    pub fn from_kinds(kinds: impl IntoIterator<Item = K>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Exact membership test.
    #[inline]
    pub fn contains(&self, kind: K) -> bool {
        self.kinds.contains(&kind)
    }

    /// Number of distinct kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// True if no kind is retryable.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterates the kinds in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.kinds.iter().copied()
    }
}

/// Builds retryable sets and classifies root causes.
#[derive(Clone, Debug)]
pub struct ExceptionClassifier {
    depth: Option<usize>,
}

impl ExceptionClassifier {
    /// Creates a classifier searching at most `depth` override layers (`None` = all).
    pub fn new(depth: Option<usize>) -> Self {
        Self { depth }
    }

    /// Builds the retryable set for one invocation.
    pub fn build_retryable_set<E: Failure>(
        &self,
        op: &OperationDescriptor<E::Kind>,
        target: &TargetContext<E>,
    ) -> RetryableSet<E::Kind> {
        let mut kinds: HashSet<E::Kind> = op.retryable_kinds().iter().copied().collect();

        match target.lookup(self.depth, |layer| layer.retry_on()) {
            Some((type_kinds, from)) => {
                tracing::trace!(
                    operation = op.name(),
                    from,
                    count = type_kinds.len(),
                    "retryable kinds declared by type"
                );
                kinds.extend(type_kinds.iter().copied());
            }
            None => {
                tracing::trace!(operation = op.name(), "no type-level retryable kinds");
            }
        }

        RetryableSet { kinds }
    }

    /// Returns `true` if the root cause's exact kind is in `set`.
    pub fn is_retryable<E: Failure>(&self, root_cause: &E, set: &RetryableSet<E::Kind>) -> bool {
        set.contains(root_cause.kind())
    }
}
