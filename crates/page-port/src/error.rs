use thiserror::Error;

/// Errors surfaced by a [`crate::PagePort`] implementation.
#[derive(Debug, Error, Clone)]
pub enum PortError {
    /// The underlying tab or browsing context is gone.
    #[error("page is closed")]
    Closed,

    /// A bounded wait elapsed before the condition was met.
    #[error("wait timed out: {0}")]
    Timeout(String),

    /// Navigation could not be completed.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Transport or protocol failure talking to the browser.
    #[error("page I/O error: {0}")]
    Io(String),
}

impl PortError {
    /// Timeouts and transport hiccups are worth retrying at the call
    /// site; a closed page never is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PortError::Timeout(_) | PortError::Io(_))
    }
}
