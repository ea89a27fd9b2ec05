//! Non-browser collaborators, passed in explicitly so concurrent
//! attempts for different accounts cannot share mutable state.

use std::path::Path;

use async_trait::async_trait;
use page_port::{Cookie, PortError};

/// Interactive operator input for code and email entry.
#[async_trait]
pub trait PromptPort: Send + Sync {
    /// Ask the operator a question; `None` on timeout or closed input.
    async fn prompt_line(&self, question: &str, timeout_secs: u64) -> Option<String>;
}

/// External one-time-password generator. Pure: the same secret at the
/// same instant yields the same 6-digit code.
pub trait TotpProvider: Send + Sync {
    fn code(&self, secret: &str) -> String;
}

/// Receives the artifacts of a successful login, exactly once per run.
#[async_trait]
pub trait SessionSink: Send + Sync {
    async fn store(
        &self,
        session_hint: &Path,
        cookies: &[Cookie],
        account_email: &str,
        is_mobile: bool,
    ) -> Result<(), PortError>;
}
