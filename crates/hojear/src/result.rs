//! Result and error types for Hojear.

use thiserror::Error;

/// Result type for Hojear operations
pub type HojearResult<T> = Result<T, HojearError>;

/// Errors that can occur in Hojear
#[derive(Debug, Error)]
pub enum HojearError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page-level error (navigation, script evaluation, settling)
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Element lookup found nothing
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector or element description that failed to resolve
        selector: String,
    },

    /// Element interaction (click, text read) failed
    #[error("Element interaction failed: {message}")]
    Interaction {
        /// Error message
        message: String,
    },

    /// Operation timed out
    ///
    /// This is the timeout-class failure that visibility probes absorb;
    /// see [`crate::element::try_visible`].
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Target never appeared before the pagination sequence was exhausted
    #[error("Target element not found after searching {pages} page(s)")]
    TargetNotFound {
        /// Number of pages searched (1-based cursor at exhaustion)
        pages: u32,
    },

    /// A caller-armed whole-search deadline expired
    ///
    /// Distinct from [`HojearError::Timeout`] (a single probe budget) and
    /// from [`HojearError::TargetNotFound`] (a completed, empty scan).
    #[error("Search deadline exceeded after {ms}ms")]
    DeadlineExceeded {
        /// Deadline in milliseconds
        ms: u64,
    },

    /// Operation applied in a state that cannot yield its result
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
