//! Core error types.

use thiserror::Error;

/// Errors raised by core type construction and validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value failed newtype validation (malformed ID, URL, etc.).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CoreError::Validation("bad endpoint URL".to_string());
        assert_eq!(err.to_string(), "validation error: bad endpoint URL");
    }
}
