//! Best-effort wrappers around the page port.
//!
//! A missed click or an unquiet network inside a handler is not a
//! failure of the attempt; the next classification pass re-evaluates
//! the page either way. These helpers absorb those errors into debug
//! logs so the "condition not met" path stays a first-class value.

use page_port::PagePort;
use tracing::debug;
use url::Url;

/// Host component of a URL, when it parses as one.
pub(crate) fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Probe visibility, treating port errors as "not visible".
pub(crate) async fn probe(page: &dyn PagePort, selector: &str, timeout_ms: u64) -> bool {
    match page.probe_visible(selector, timeout_ms).await {
        Ok(visible) => visible,
        Err(err) => {
            debug!(selector, %err, "visibility probe failed");
            false
        }
    }
}

/// Click, reporting success as a bool instead of an error.
pub(crate) async fn try_click(page: &dyn PagePort, selector: &str, timeout_ms: u64) -> bool {
    match page.click(selector, timeout_ms).await {
        Ok(()) => true,
        Err(err) => {
            debug!(selector, %err, "click failed");
            false
        }
    }
}

/// Fill, reporting success as a bool instead of an error.
pub(crate) async fn try_fill(page: &dyn PagePort, selector: &str, text: &str) -> bool {
    match page.fill(selector, text).await {
        Ok(()) => true,
        Err(err) => {
            debug!(selector, %err, "fill failed");
            false
        }
    }
}

/// Best-effort wait for network quiescence after a click or submit.
pub(crate) async fn settle(page: &dyn PagePort, timeout_ms: u64) {
    if let Err(err) = page.wait_for_quiescence(timeout_ms).await {
        debug!(%err, "network did not go quiet in time");
    }
}

/// Inner text of an element, or `None` when absent or unreadable.
pub(crate) async fn text_of(
    page: &dyn PagePort,
    selector: &str,
    timeout_ms: u64,
) -> Option<String> {
    match page.text_of(selector, timeout_ms).await {
        Ok(text) => text,
        Err(err) => {
            debug!(selector, %err, "text read failed");
            None
        }
    }
}

/// Current URL, or `None` mid-navigation / on transport failure.
pub(crate) async fn current_url(page: &dyn PagePort) -> Option<String> {
    match page.current_url().await {
        Ok(url) => Some(url),
        Err(err) => {
            debug!(%err, "could not read current url");
            None
        }
    }
}
