use async_trait::async_trait;

use crate::{Cookie, PortError, WaitPolicy};

/// One remote browser tab, as seen by the login orchestrator.
///
/// Every wait is bounded by an explicit timeout; implementations must
/// never block indefinitely. Probe-style calls report "condition not
/// met" as a value (`Ok(false)` / `Ok(None)`), reserving `Err` for the
/// page being gone or the transport failing.
#[async_trait]
pub trait PagePort: Send + Sync {
    /// Navigate the tab, holding the caller per `wait`.
    async fn navigate(&self, url: &str, wait: WaitPolicy) -> Result<(), PortError>;

    /// The URL currently shown in the tab.
    async fn current_url(&self) -> Result<String, PortError>;

    /// Whether the underlying tab has been closed out from under us.
    fn is_closed(&self) -> bool;

    /// Is any element matching `selector` visible within `timeout_ms`?
    ///
    /// Not-found and not-visible-in-time are both `Ok(false)`.
    async fn probe_visible(&self, selector: &str, timeout_ms: u64) -> Result<bool, PortError>;

    /// Click the first element matching `selector`, waiting up to
    /// `timeout_ms` for it to become clickable.
    async fn click(&self, selector: &str, timeout_ms: u64) -> Result<(), PortError>;

    /// Replace the value of the first element matching `selector`.
    /// Implementations clear any existing value before typing.
    async fn fill(&self, selector: &str, text: &str) -> Result<(), PortError>;

    /// Send a single key (e.g. "Enter") to the focused element.
    async fn press_key(&self, key: &str) -> Result<(), PortError>;

    /// Inner text of the first matching element, if one is visible
    /// within `timeout_ms`.
    async fn text_of(&self, selector: &str, timeout_ms: u64)
        -> Result<Option<String>, PortError>;

    /// Full markup of the current document.
    async fn content(&self) -> Result<String, PortError>;

    /// Wait for the network to go quiet, up to `timeout_ms`.
    async fn wait_for_quiescence(&self, timeout_ms: u64) -> Result<(), PortError>;

    /// Reload the current document.
    async fn reload(&self) -> Result<(), PortError>;

    /// All cookies visible to the browsing context.
    async fn cookies(&self) -> Result<Vec<Cookie>, PortError>;
}
