//! Fatal error taxonomy for a login attempt.
//!
//! Only attempt-ending conditions live here. Single probe timeouts,
//! failed clicks and missed quiescence windows are absorbed at their
//! call sites (logged at debug) and feed back into re-classification.

use page_port::PortError;
use thiserror::Error;

use crate::state::LoginState;

#[derive(Debug, Error)]
pub enum LoginError {
    /// The identity provider has locked the account.
    #[error("account is locked")]
    AccountLocked,

    /// The sign-in page surfaced an explicit error banner.
    #[error("identity page reported an error: {text}")]
    ErrorAlert { text: String },

    /// A state handler reported it cannot make progress.
    #[error("login aborted at state {state}")]
    Aborted { state: LoginState },

    /// The classify-dispatch budget ran out before `LoggedIn`.
    #[error("login did not reach an authenticated state within {limit} iterations")]
    IterationBudget { limit: u32 },

    /// The tab was closed out from under the orchestrator.
    #[error("page closed unexpectedly")]
    PageClosed,

    /// Manual code entry exhausted its attempt budget.
    #[error("manual code input failed or timed out")]
    CodeEntryExhausted,

    /// The configured recovery email was rejected outright.
    #[error("recovery email {email} was rejected")]
    RecoveryEmailRejected { email: String },

    /// Interactive recovery-email entry exhausted its attempt budget.
    #[error("recovery email input failed or timed out")]
    RecoveryEmailExhausted,

    /// A computed authenticator code was rejected. Not retried: a bad
    /// computed code means clock skew or a wrong secret, not a blip.
    #[error("authenticator code was rejected")]
    TotpRejected,

    /// The passwordless push was never approved.
    #[error("approval not received within {limit_secs}s")]
    ApprovalTimeout { limit_secs: u64 },

    /// A page operation failed in a position with no local fallback.
    #[error("page port failure: {0}")]
    Page(#[from] PortError),
}

pub type LoginResult<T> = Result<T, LoginError>;

impl LoginError {
    /// Whether retrying the whole attempt could plausibly succeed.
    /// Locked accounts and rejected authenticator secrets will fail the
    /// same way every time.
    pub fn is_attempt_retryable(&self) -> bool {
        !matches!(
            self,
            LoginError::AccountLocked
                | LoginError::TotpRejected
                | LoginError::RecoveryEmailRejected { .. }
        )
    }
}
