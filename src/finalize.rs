//! Post-login session finalization: confirm the cross-site session,
//! pull the request-verification token out of the portal markup, and
//! hand the cookie set to the persistence collaborator.

use page_port::{Cookie, PagePort, WaitPolicy};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, instrument, warn};

use crate::{
    account::Account, config::FlowConfig, errors::LoginResult, ports::SessionSink, selectors,
    util,
};

/// Outputs of a successful run. The token may legitimately be absent;
/// downstream activities that need it are skipped, not failed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionArtifacts {
    pub cookies: Vec<Cookie>,
    pub verification_token: Option<String>,
}

/// Pull the request-verification token out of portal markup.
///
/// The portal embeds it in one of two places depending on the page
/// generation: a hidden form input, or a JSON blob inside an inline
/// script.
pub fn extract_request_token(markup: &str) -> Option<String> {
    if let Some(at) = markup.find("__RequestVerificationToken") {
        let rest = &markup[at..];
        if let Some(value_at) = rest.find("value=\"") {
            let rest = &rest[value_at + "value=\"".len()..];
            if let Some(end) = rest.find('"') {
                let token = &rest[..end];
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    if let Some(at) = markup.find("\"requestVerificationToken\":\"") {
        let rest = &markup[at + "\"requestVerificationToken\":\"".len()..];
        if let Some(end) = rest.find('"') {
            let token = &rest[..end];
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    None
}

/// Confirm the secondary-site session is live. An incidental passkey
/// interstitial on that site is dismissed rather than handled.
async fn confirm_secondary_session(page: &dyn PagePort, config: &FlowConfig) -> bool {
    if let Err(err) = page
        .navigate(&config.secondary_site_url, WaitPolicy::DomReady)
        .await
    {
        debug!(%err, "secondary site navigation failed");
        return false;
    }

    for attempt in 1..=config.finalize_attempt_limit {
        if util::probe(
            page,
            selectors::SECONDARY_SESSION_MARKER,
            config.probe_timeout_ms,
        )
        .await
        {
            debug!(attempt, "secondary session confirmed");
            return true;
        }

        if util::probe(
            page,
            selectors::PASSKEY_ERROR_IMAGE,
            config.probe_timeout_ms,
        )
        .await
        {
            debug!(attempt, "dismissing passkey interstitial on secondary site");
            util::try_click(page, selectors::SECONDARY_BUTTON, config.click_timeout_ms).await;
        }

        sleep(Duration::from_millis(config.finalize_retry_delay_ms)).await;
    }
    false
}

/// Fetch portal markup until a verification token shows up, bounded by
/// the finalizer attempt budget.
async fn fetch_verification_token(page: &dyn PagePort, config: &FlowConfig) -> Option<String> {
    if let Err(err) = page
        .navigate(&config.portal_base_url, WaitPolicy::DomReady)
        .await
    {
        debug!(%err, "portal navigation for token fetch failed");
        return None;
    }

    for attempt in 1..=config.finalize_attempt_limit {
        match page.content().await {
            Ok(markup) => {
                if let Some(token) = extract_request_token(&markup) {
                    debug!(attempt, "verification token extracted");
                    return Some(token);
                }
            }
            Err(err) => debug!(attempt, %err, "could not read portal markup"),
        }

        if let Err(err) = page.reload().await {
            debug!(attempt, %err, "portal reload failed");
        }
        sleep(Duration::from_millis(config.finalize_retry_delay_ms)).await;
    }
    None
}

/// Finalize a logged-in session and hand its cookies off.
///
/// Both verification steps degrade to warnings; only losing the page
/// itself (navigation or cookie collection failing hard) is fatal.
#[instrument(skip_all, fields(account = %account.email))]
pub async fn finalize_session(
    page: &dyn PagePort,
    sink: &dyn SessionSink,
    account: &Account,
    config: &FlowConfig,
) -> LoginResult<SessionArtifacts> {
    page.navigate(&config.portal_base_url, WaitPolicy::NetworkIdle)
        .await?;

    let expected_host = util::host_of(&config.portal_base_url).unwrap_or_default();
    match util::current_url(page).await.and_then(|u| util::host_of(&u)) {
        Some(host) if host == expected_host => {}
        other => warn!(?other, expected = %expected_host, "portal host mismatch after login"),
    }

    if !confirm_secondary_session(page, config).await {
        warn!("could not confirm the secondary-site session");
    }

    let verification_token = fetch_verification_token(page, config).await;
    if verification_token.is_none() {
        warn!("no verification token found; token-dependent activities will be skipped");
    }

    let cookies = page.cookies().await?;
    info!(cookie_count = cookies.len(), "session finalized");

    if let Err(err) = sink
        .store(
            &config.session_hint,
            &cookies,
            &account.email,
            config.is_mobile,
        )
        .await
    {
        warn!(%err, "session persistence failed");
    }

    Ok(SessionArtifacts {
        cookies,
        verification_token,
    })
}
