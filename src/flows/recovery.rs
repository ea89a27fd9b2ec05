//! Recovery-email challenge.

use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::{
    account::Account,
    errors::{LoginError, LoginResult},
    handlers::FlowDeps,
    selectors, util,
};

/// Loose shape check; the provider does the real validation.
pub(crate) fn is_plausible_email(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

async fn submit_email(deps: &FlowDeps<'_>, email: &str) -> bool {
    let config = deps.config;
    util::try_fill(deps.page, selectors::RECOVERY_EMAIL_FIELD, email).await;
    util::try_click(deps.page, selectors::SUBMIT_ANY, config.click_timeout_ms).await;
    util::settle(deps.page, config.quiescence_timeout_ms).await;
    sleep(Duration::from_millis(config.settle_delay_ms)).await;

    !util::probe(
        deps.page,
        selectors::RECOVERY_EMAIL_ERROR,
        config.probe_timeout_ms,
    )
    .await
}

/// Answer the recovery-email challenge.
///
/// A configured recovery email is submitted exactly once and a
/// rejection is fatal: the stored value is wrong and re-typing it will
/// not help. Without one, the operator is prompted interactively with
/// the usual bounded attempt loop.
pub(crate) async fn recovery_email(deps: &FlowDeps<'_>, account: &Account) -> LoginResult<()> {
    let config = deps.config;

    if let Some(email) = account.recovery_email.as_deref().filter(|e| !e.is_empty()) {
        if submit_email(deps, email).await {
            info!("configured recovery email accepted");
            return Ok(());
        }
        return Err(LoginError::RecoveryEmailRejected {
            email: email.to_string(),
        });
    }

    info!("no recovery email configured, prompting the operator");
    for attempt in 1..=config.code_attempt_limit {
        let answer = deps
            .prompt
            .prompt_line("Enter the recovery email address", config.prompt_timeout_secs)
            .await;

        let email = match answer {
            Some(email) if is_plausible_email(email.trim()) => email.trim().to_string(),
            Some(other) => {
                warn!(attempt, input = %other, "rejected malformed email address");
                continue;
            }
            None => {
                warn!(attempt, "recovery email prompt timed out");
                continue;
            }
        };

        if submit_email(deps, &email).await {
            info!(attempt, "recovery email accepted");
            return Ok(());
        }
        warn!(attempt, "recovery email rejected, clearing the field");
        util::try_fill(deps.page, selectors::RECOVERY_EMAIL_FIELD, "").await;
    }

    Err(LoginError::RecoveryEmailExhausted)
}
