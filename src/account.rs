use serde::{Deserialize, Serialize};

/// Credentials for one rewards account.
///
/// Immutable for the duration of a login attempt; handlers only ever
/// read from it. Optional fields gate which sub-flows are available:
/// no password pushes the classifier toward the code-based path, no
/// TOTP secret falls back to interactive code entry, no recovery email
/// falls back to an interactive prompt.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: Option<String>,
    pub totp_secret: Option<String>,
    pub recovery_email: Option<String>,
}

impl Account {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
            totp_secret: None,
            recovery_email: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_totp_secret(mut self, secret: impl Into<String>) -> Self {
        self.totp_secret = Some(secret.into());
        self
    }

    pub fn with_recovery_email(mut self, email: impl Into<String>) -> Self {
        self.recovery_email = Some(email.into());
        self
    }

    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}
