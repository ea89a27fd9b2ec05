use serde::{Deserialize, Serialize};

/// How long a navigation should hold the caller before returning.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum WaitPolicy {
    /// Return as soon as the navigation is committed.
    None,
    /// Wait for the document to reach DOM-ready.
    #[default]
    DomReady,
    /// Wait for DOM-ready plus a quiet network window.
    NetworkIdle,
}

/// A cookie captured from the browsing context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Unix timestamp in seconds; session cookies carry no expiry.
    pub expires: Option<f64>,
    pub http_only: bool,
    pub secure: bool,
}
