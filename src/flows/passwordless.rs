//! Passwordless push approval wait.

use tokio::time::{sleep, Duration};
use tracing::info;
use url::Url;

use crate::{
    errors::{LoginError, LoginResult},
    handlers::FlowDeps,
    selectors, util,
};

/// Wait for the account owner to approve the push in their
/// authenticator app.
///
/// The on-screen number is advisory only (it must be tapped in the
/// app, not entered here), so it is logged and otherwise ignored. The
/// flow then polls the URL once per interval until the path flips to
/// the known post-approval prefix, up to the configured poll budget.
pub(crate) async fn passwordless(deps: &FlowDeps<'_>) -> LoginResult<()> {
    let config = deps.config;

    match util::text_of(
        deps.page,
        selectors::PASSWORDLESS_MARK,
        config.probe_timeout_ms,
    )
    .await
    {
        Some(number) if !number.trim().is_empty() => {
            info!(number = %number.trim(), "approve the sign-in by tapping this number in the authenticator app");
        }
        _ => info!("approve the sign-in in the authenticator app"),
    }

    for elapsed in 1..=config.passwordless_poll_limit {
        sleep(Duration::from_millis(config.passwordless_poll_interval_ms)).await;

        if let Some(url) = util::current_url(deps.page).await {
            let approved = Url::parse(&url)
                .map(|u| u.path().starts_with(&config.approval_path_prefix))
                .unwrap_or(false);
            if approved {
                info!("push approval received");
                return Ok(());
            }
        }

        if elapsed % 5 == 0 {
            info!(elapsed, "still waiting for push approval");
        }
    }

    Err(LoginError::ApprovalTimeout {
        limit_secs: config.passwordless_poll_limit as u64
            * config.passwordless_poll_interval_ms
            / 1_000,
    })
}
