//! # Kind tags and root-cause extraction.
//!
//! [`Failure`] is implemented by every error type the executor can retry.
//! It exposes two things:
//! - [`Failure::kind`] an enumerated tag compared by **exact equality**;
//! - [`Failure::into_cause`] detaches the wrapped cause, if there is one.
//!
//! There is no kind hierarchy: a retry declaration must enumerate every concrete
//! kind that should be retried. A "more specific" failure whose tag was not
//! declared is **not** retryable, even if a broader tag was.
//!
//! ## Example
//! ```rust
//! use retryvisor::{Failure, root_cause};
//!
//! #[derive(Debug)]
//! enum DbError {
//!     Deadlock,
//!     Wrapped(Box<DbError>),
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum DbKind { Deadlock, Wrapped }
//!
//! impl Failure for DbError {
//!     type Kind = DbKind;
//!
//!     fn kind(&self) -> DbKind {
//!         match self {
//!             DbError::Deadlock => DbKind::Deadlock,
//!             DbError::Wrapped(_) => DbKind::Wrapped,
//!         }
//!     }
//!
//!     fn into_cause(self) -> Result<Self, Self> {
//!         match self {
//!             DbError::Wrapped(inner) => Ok(*inner),
//!             leaf => Err(leaf),
//!         }
//!     }
//! }
//!
//! let err = DbError::Wrapped(Box::new(DbError::Wrapped(Box::new(DbError::Deadlock))));
//! assert_eq!(root_cause(err).kind(), DbKind::Deadlock);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// An error that can be classified by kind and unwrapped to its cause.
///
/// Failures are owned values (`'static`): the pre-retry hook stored on a
/// [`TypeOverrides`](crate::TypeOverrides) layer receives them by reference.
pub trait Failure: Sized + 'static {
    /// Enumerated kind tag used for retry classification.
    type Kind: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Returns the kind tag of this error (not of its causes).
    fn kind(&self) -> Self::Kind;

    /// Detaches the wrapped cause.
    ///
    /// Returns `Ok(cause)` if this error wraps another one, otherwise gives
    /// `self` back as `Err(self)`. The default treats every error as a leaf.
    fn into_cause(self) -> Result<Self, Self> {
        Err(self)
    }
}

/// Descends the cause chain and returns its deepest error.
///
/// An error without a wrapped cause is its own root cause.
pub fn root_cause<E: Failure>(mut err: E) -> E {
    loop {
        match err.into_cause() {
            Ok(cause) => err = cause,
            Err(leaf) => return leaf,
        }
    }
}
