//! Delivery errors.

use thiserror::Error;

/// Result type alias using [`DeliverError`].
pub type Result<T> = std::result::Result<T, DeliverError>;

/// One failed dispatch attempt. The class decides the retry backoff.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    /// The request never completed (connect, DNS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors from the delivery queue manager.
#[derive(Debug, Error)]
pub enum DeliverError {
    /// The configured endpoint URL failed validation.
    #[error(transparent)]
    InvalidEndpoint(#[from] grapnel_core::CoreError),

    /// A payload could not be serialized to JSON.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// All retry attempts were exhausted.
    #[error("delivery failed after {attempts} attempts: {last}")]
    Exhausted {
        /// Total attempts made.
        attempts: u32,
        /// The final attempt's failure.
        last: SendError,
    },
}
