//! Session errors.

use thiserror::Error;

/// Result type alias using [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that prevent a session from producing a summary at all.
///
/// Aborts that happen mid-session (block signal, timeout, host failure)
/// are not errors here: the collector still returns the partial summary
/// with a typed [`crate::SessionOutcome`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// A session is already running on this collector. Sessions are never
    /// queued; the caller gets this immediately and the in-progress
    /// session is unaffected.
    #[error("collection already in progress")]
    AlreadyInProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            SessionError::AlreadyInProgress.to_string(),
            "collection already in progress"
        );
    }
}
