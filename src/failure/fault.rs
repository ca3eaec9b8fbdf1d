//! # Fault: a ready-made kind-tagged failure.
//!
//! [`Fault`] is a small error value for operations that do not already have an
//! error type of their own. It carries:
//! - a kind tag `K` (any `Copy + Eq + Hash + Debug` enum);
//! - a human-readable message;
//! - an optional wrapped cause (another `Fault<K>`).
//!
//! ## Example
//! ```rust
//! use retryvisor::{Failure, Fault, root_cause};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Timeout, Service }
//!
//! let err = Fault::wrap(Kind::Service, "lookup failed", Fault::new(Kind::Timeout, "5s elapsed"));
//! assert_eq!(err.kind(), Kind::Service);
//! assert_eq!(root_cause(err).kind(), Kind::Timeout);
//! ```

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::hash::Hash;

use crate::failure::Failure;

/// Kind-tagged error with an optional cause chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault<K> {
    kind: K,
    message: Cow<'static, str>,
    cause: Option<Box<Fault<K>>>,
}

impl<K> Fault<K> {
    /// Creates a leaf fault (no cause).
    pub fn new(kind: K, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a fault wrapping `cause`.
    pub fn wrap(kind: K, message: impl Into<Cow<'static, str>>, cause: Fault<K>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Returns the message of this fault (without its causes).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the wrapped cause, if any.
    pub fn cause(&self) -> Option<&Fault<K>> {
        self.cause.as_deref()
    }
}

impl<K: fmt::Debug> fmt::Display for Fault<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl<K: fmt::Debug + 'static> Error for Fault<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}

impl<K> Failure for Fault<K>
where
    K: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    type Kind = K;

    fn kind(&self) -> K {
        self.kind
    }

    fn into_cause(self) -> Result<Self, Self> {
        let Fault {
            kind,
            message,
            cause,
        } = self;
        match cause {
            Some(inner) => Ok(*inner),
            None => Err(Fault {
                kind,
                message,
                cause: None,
            }),
        }
    }
}
