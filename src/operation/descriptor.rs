//! # Operation descriptor.
//!
//! [`OperationDescriptor`] is the resolved form of an operation's retry
//! declaration. Unset policy fields are `None`: an explicit value, even one equal
//! to the configured default, always wins over type-level overrides.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::OperationDescriptor;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Timeout, Refused, Invalid }
//!
//! let op = OperationDescriptor::new("orders::fetch")
//!     .with_attempts(2)
//!     .with_delay(Duration::from_millis(10))
//!     .retry_on(Kind::Timeout)
//!     .declares([Kind::Timeout, Kind::Invalid]);
//!
//! assert_eq!(op.attempts(), Some(2));
//! assert_eq!(op.declared_non_retryable(), vec![Kind::Invalid]);
//! ```

use std::borrow::Cow;
use std::time::Duration;

/// Identity and operation-level retry declaration of one wrapped operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationDescriptor<K> {
    name: Cow<'static, str>,
    declared: Vec<K>,
    attempts: Option<u32>,
    delay: Option<Duration>,
    retry_on: Vec<K>,
}

impl<K> OperationDescriptor<K> {
    /// Creates a descriptor with nothing set.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            declared: Vec::new(),
            attempts: None,
            delay: None,
            retry_on: Vec::new(),
        }
    }

    /// Sets the operation-level retry count (`0` = call once, never retry).
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    /// Sets the operation-level delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Adds one retryable failure kind.
    pub fn retry_on(mut self, kind: K) -> Self {
        self.retry_on.push(kind);
        self
    }

    /// Adds several retryable failure kinds.
    pub fn retry_on_all(mut self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.retry_on.extend(kinds);
        self
    }

    /// Records failure kinds the operation is declared to produce.
    ///
    /// Used for diagnostics only; declaring a kind does not make it retryable.
    pub fn declares(mut self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.declared.extend(kinds);
        self
    }

    /// Returns the operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operation-level retry count, if explicitly set.
    pub fn attempts(&self) -> Option<u32> {
        self.attempts
    }

    /// Operation-level delay, if explicitly set.
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Operation-level retryable kinds.
    pub fn retryable_kinds(&self) -> &[K] {
        &self.retry_on
    }

    /// Declared failure kinds.
    pub fn declared_kinds(&self) -> &[K] {
        &self.declared
    }
}

impl<K: PartialEq + Copy> OperationDescriptor<K> {
    /// Declared kinds that are not in the operation-level retryable list.
    pub fn declared_non_retryable(&self) -> Vec<K> {
        self.declared
            .iter()
            .filter(|k| !self.retry_on.contains(k))
            .copied()
            .collect()
    }
}
