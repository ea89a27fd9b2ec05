//! Authenticator one-time-code entry.

use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::{
    account::Account,
    errors::{LoginError, LoginResult},
    flows::manual_code::manual_code,
    handlers::FlowDeps,
    selectors, util,
};

/// Enter the current authenticator code.
///
/// With a configured secret the code is computed and submitted once; a
/// rejection is fatal immediately, since a freshly computed code that
/// fails points at clock skew or a wrong secret, not a transient issue.
/// Without a secret the operator types codes interactively.
pub(crate) async fn totp(deps: &FlowDeps<'_>, account: &Account) -> LoginResult<()> {
    let config = deps.config;

    let Some(secret) = account.totp_secret.as_deref().filter(|s| !s.is_empty()) else {
        info!("no authenticator secret configured, falling back to manual entry");
        return manual_code(deps, true).await;
    };

    let code = deps.totp.code(secret);
    let surface = if util::probe(
        deps.page,
        selectors::TOTP_INPUT_OLD,
        config.probe_timeout_ms,
    )
    .await
    {
        selectors::TOTP_INPUT_OLD
    } else {
        selectors::TOTP_INPUT_NEW
    };

    util::try_fill(deps.page, surface, &code).await;
    util::try_click(deps.page, selectors::SUBMIT_ANY, config.click_timeout_ms).await;
    util::settle(deps.page, config.quiescence_timeout_ms).await;
    sleep(Duration::from_millis(config.settle_delay_ms)).await;

    if util::probe(deps.page, selectors::TOTP_ERROR, config.probe_timeout_ms).await {
        warn!("computed authenticator code was rejected");
        return Err(LoginError::TotpRejected);
    }

    info!("authenticator code accepted");
    Ok(())
}
