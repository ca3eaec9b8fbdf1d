//! # Type-level overrides.
//!
//! A [`TargetContext`] describes the object that owns the wrapped operation as an
//! ordered **override chain**: its own type first, then its parent, then any
//! further ancestors the caller chooses to supply. Each link is a
//! [`TypeOverrides`] layer that may set:
//! - `attempts` retry count used when the operation leaves it unset;
//! - `delay` delay used when the operation leaves it unset;
//! - `retry_on` additional retryable failure kinds;
//! - `callback` the pre-retry hook.
//!
//! Every field is looked up independently: the first layer that sets it wins,
//! later layers are not consulted for that field. How many layers are searched is
//! limited by [`RetryConfig::override_depth`](crate::RetryConfig::override_depth).
//!
//! ```text
//! TargetContext
//!   ├─ [0] OrderService   attempts=None  delay=Some(50ms)  retry_on=None
//!   └─ [1] BaseService    attempts=Some(4) delay=Some(1s)  retry_on=Some([Timeout])
//!
//! attempts → 4     (from BaseService)
//! delay    → 50ms  (from OrderService)
//! retry_on → [Timeout]
//! ```
//!
//! Layers can also be built from raw string fields with
//! [`TypeOverrides::from_fields`], as a metadata reader would supply them.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::failure::Failure;
use crate::operation::{CallbackHandle, RetryCallback};

/// Field key holding the retry count.
pub const FIELD_ATTEMPTS: &str = "retry_attempts";
/// Field key holding the delay in milliseconds.
pub const FIELD_DELAY_MS: &str = "retry_delay_ms";
/// Field key holding a comma separated list of retryable kinds.
pub const FIELD_EXCEPTIONS: &str = "retry_exceptions";

/// One layer of type-level retry overrides.
pub struct TypeOverrides<E: Failure> {
    type_name: Cow<'static, str>,
    attempts: Option<u32>,
    delay: Option<Duration>,
    retry_on: Option<Vec<E::Kind>>,
    callback: Option<CallbackHandle<E>>,
}

impl<E: Failure> TypeOverrides<E> {
    /// Creates a layer that overrides nothing.
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
            attempts: None,
            delay: None,
            retry_on: None,
            callback: None,
        }
    }

    /// Sets the type-level retry count.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    /// Sets the type-level delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Declares the type-level retryable kinds.
    ///
    /// An empty list still counts as declared and shadows ancestors.
    pub fn with_retry_on(mut self, kinds: impl IntoIterator<Item = E::Kind>) -> Self {
        self.retry_on = Some(kinds.into_iter().collect());
        self
    }

    /// Attaches the pre-retry hook.
    pub fn with_callback(mut self, callback: impl RetryCallback<E>) -> Self {
        self.callback = Some(std::sync::Arc::new(callback));
        self
    }

    /// Attaches an already shared pre-retry hook.
    pub fn with_callback_handle(mut self, callback: CallbackHandle<E>) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Returns the type name of this layer.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Type-level retry count, if set.
    pub fn attempts(&self) -> Option<u32> {
        self.attempts
    }

    /// Type-level delay, if set.
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Type-level retryable kinds, if declared (an empty list is declared).
    pub fn retry_on(&self) -> Option<&[E::Kind]> {
        self.retry_on.as_deref()
    }

    /// Attached pre-retry hook, if any.
    pub fn callback(&self) -> Option<&CallbackHandle<E>> {
        self.callback.as_ref()
    }
}

impl<E> TypeOverrides<E>
where
    E: Failure,
    E::Kind: FromStr,
    <E::Kind as FromStr>::Err: fmt::Display,
{
    /// Builds a layer from raw `(key, value)` fields.
    ///
    /// Recognized keys are `retry_attempts` (integer), `retry_delay_ms`
    /// (integer milliseconds) and `retry_exceptions` (comma separated kind names).
    /// Other keys are ignored. A recognized key with a malformed value is an error.
    ///
    /// # Example
    /// ```rust
    /// use std::str::FromStr;
    /// use std::time::Duration;
    /// use retryvisor::{Fault, TypeOverrides};
    ///
    /// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// enum Kind { Timeout, Refused }
    ///
    /// impl FromStr for Kind {
    ///     type Err = String;
    ///     fn from_str(s: &str) -> Result<Self, String> {
    ///         match s {
    ///             "Timeout" => Ok(Kind::Timeout),
    ///             "Refused" => Ok(Kind::Refused),
    ///             other => Err(format!("no kind named {other}")),
    ///         }
    ///     }
    /// }
    ///
    /// let layer = TypeOverrides::<Fault<Kind>>::from_fields(
    ///     "OrderService",
    ///     [("retry_attempts", "4"), ("retry_delay_ms", "250"), ("retry_exceptions", "Timeout, Refused")],
    /// )?;
    /// assert_eq!(layer.attempts(), Some(4));
    /// assert_eq!(layer.delay(), Some(Duration::from_millis(250)));
    /// assert_eq!(layer.retry_on(), Some(&[Kind::Timeout, Kind::Refused][..]));
    /// # Ok::<(), retryvisor::ConfigError>(())
    /// ```
    pub fn from_fields<'a, I>(
        type_name: impl Into<Cow<'static, str>>,
        fields: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut layer = Self::new(type_name);

        for (key, value) in fields {
            match key {
                FIELD_ATTEMPTS => {
                    let n = value
                        .trim()
                        .parse::<u32>()
                        .map_err(|e| layer.invalid(FIELD_ATTEMPTS, value, e))?;
                    layer.attempts = Some(n);
                }
                FIELD_DELAY_MS => {
                    let ms = value
                        .trim()
                        .parse::<u64>()
                        .map_err(|e| layer.invalid(FIELD_DELAY_MS, value, e))?;
                    layer.delay = Some(Duration::from_millis(ms));
                }
                FIELD_EXCEPTIONS => {
                    let mut kinds = Vec::new();
                    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        let kind = name.parse::<E::Kind>().map_err(|e| ConfigError::UnknownKind {
                            type_name: layer.type_name.to_string(),
                            kind: name.to_string(),
                            reason: e.to_string(),
                        })?;
                        kinds.push(kind);
                    }
                    layer.retry_on = Some(kinds);
                }
                _ => {}
            }
        }
        Ok(layer)
    }

    fn invalid(&self, field: &'static str, value: &str, err: impl fmt::Display) -> ConfigError {
        ConfigError::InvalidField {
            type_name: self.type_name.to_string(),
            field,
            value: value.to_string(),
            reason: err.to_string(),
        }
    }
}

impl<E: Failure> Clone for TypeOverrides<E> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            attempts: self.attempts,
            delay: self.delay,
            retry_on: self.retry_on.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<E: Failure> fmt::Debug for TypeOverrides<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeOverrides")
            .field("type_name", &self.type_name)
            .field("attempts", &self.attempts)
            .field("delay", &self.delay)
            .field("retry_on", &self.retry_on)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Ordered override chain of the object owning an operation (nearest first).
pub struct TargetContext<E: Failure> {
    layers: Vec<TypeOverrides<E>>,
}

impl<E: Failure> TargetContext<E> {
    /// Creates a context whose own type is `own`.
    pub fn new(own: TypeOverrides<E>) -> Self {
        Self { layers: vec![own] }
    }

    /// Creates a context with no overrides at all.
    pub fn empty() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends the next ancestor layer (consulted after every existing layer).
    pub fn with_parent(mut self, parent: TypeOverrides<E>) -> Self {
        self.layers.push(parent);
        self
    }

    /// Returns the layers, nearest first.
    pub fn layers(&self) -> &[TypeOverrides<E>] {
        &self.layers
    }

    /// Name of the nearest layer, used in diagnostics.
    pub fn type_name(&self) -> &str {
        self.layers.first().map(|l| l.type_name()).unwrap_or("<none>")
    }

    /// Returns the first value `f` yields, searching at most `depth` layers
    /// (`None` = the whole chain), together with the layer it came from.
    pub(crate) fn lookup<'a, T>(
        &'a self,
        depth: Option<usize>,
        f: impl Fn(&'a TypeOverrides<E>) -> Option<T>,
    ) -> Option<(T, &'a str)> {
        let limit = depth.unwrap_or(self.layers.len());
        self.layers
            .iter()
            .take(limit)
            .find_map(|layer| f(layer).map(|v| (v, layer.type_name())))
    }
}

impl<E: Failure> Default for TargetContext<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Failure> Clone for TargetContext<E> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
        }
    }
}

impl<E: Failure> fmt::Debug for TargetContext<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetContext")
            .field("layers", &self.layers)
            .finish()
    }
}
