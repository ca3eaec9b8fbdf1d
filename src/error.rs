//! Error types produced by retryvisor itself.
//!
//! Failures of the wrapped operation are **never** wrapped into a crate error:
//! the executor returns the operation's own root cause unchanged. The only errors
//! retryvisor raises on its own are configuration errors:
//!
//! - [`ConfigError`] malformed override metadata, surfaced when a
//!   [`TypeOverrides`](crate::TypeOverrides) layer is built from raw fields.
//!
//! Errors provide `as_label` and `as_message` helpers for logs/metrics.

use thiserror::Error;

/// # Errors produced while building retry configuration.
///
/// A declared override field holding a value of the wrong type is a configuration
/// error, not a retry decision: it is reported when the layer is built and never
/// silently treated as "not set".
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An override field is present but its value cannot be parsed.
    #[error("invalid value {value:?} for field `{field}` on `{type_name}`: {reason}")]
    InvalidField {
        /// Type the override layer belongs to.
        type_name: String,
        /// Name of the offending field.
        field: &'static str,
        /// The raw value as declared.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A retryable-failure list names a kind that does not exist.
    #[error("unknown failure kind {kind:?} in `{type_name}`: {reason}")]
    UnknownKind {
        /// Type the override layer belongs to.
        type_name: String,
        /// The unrecognized kind name.
        kind: String,
        /// Parser message.
        reason: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryvisor::ConfigError;
    ///
    /// let err = ConfigError::InvalidField {
    ///     type_name: "OrderService".into(),
    ///     field: "retry_attempts",
    ///     value: "three".into(),
    ///     reason: "invalid digit found in string".into(),
    /// };
    /// assert_eq!(err.as_label(), "config_invalid_field");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::InvalidField { .. } => "config_invalid_field",
            ConfigError::UnknownKind { .. } => "config_unknown_kind",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConfigError::InvalidField {
                type_name,
                field,
                value,
                ..
            } => format!("{type_name}.{field}={value:?} is malformed"),
            ConfigError::UnknownKind {
                type_name, kind, ..
            } => format!("{type_name} lists unknown kind {kind:?}"),
        }
    }
}
