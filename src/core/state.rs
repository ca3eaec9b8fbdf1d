/// State of one invocation's retry loop.
///
/// ```text
/// Attempting ──Ok──────────────────────────► Success
///     │
///     └─Err─► root cause not retryable ────► Aborted
///             retryable, retries left ─────► Attempting
///             retryable, none left ────────► Exhausted
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryState {
    /// An attempt is running or about to run.
    Attempting,
    /// The operation returned a value.
    Success,
    /// A non-retryable root cause was returned to the caller.
    Aborted,
    /// All attempts failed; the last root cause was returned to the caller.
    Exhausted,
}

impl RetryState {
    /// Returns `true` for every state except `Attempting`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RetryState::Attempting)
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryState::Attempting => "attempting",
            RetryState::Success => "success",
            RetryState::Aborted => "aborted",
            RetryState::Exhausted => "exhausted",
        }
    }
}
