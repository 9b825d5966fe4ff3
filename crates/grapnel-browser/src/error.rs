//! Host-page access errors.

use thiserror::Error;

/// Result type alias using [`HostError`].
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors from the browser host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Browser process or protocol failure.
    #[error("chromium error: {0}")]
    Chromium(String),

    /// Navigation to a page failed.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// None of the candidate selectors matched a clickable element.
    #[error("no element matched any of: {0}")]
    SelectorNotFound(String),

    /// In-page script evaluation failed.
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}
