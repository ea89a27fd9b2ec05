//! Per-state handlers, dispatched by the orchestrator loop.
//!
//! A handler performs the interaction its screen requires and reports
//! whether the loop should continue. Clicks and fills are best-effort:
//! a miss feeds back into the next classification pass instead of
//! failing the attempt. Terminal states raise here.

use page_port::{PagePort, WaitPolicy};
use tracing::{debug, info, warn};

use crate::{
    account::Account,
    config::FlowConfig,
    errors::{LoginError, LoginResult},
    flows,
    ports::{PromptPort, TotpProvider},
    selectors,
    state::LoginState,
    util,
};

/// Shared collaborators for handlers and sub-flows, passed explicitly
/// per attempt.
pub struct FlowDeps<'a> {
    pub page: &'a dyn PagePort,
    pub prompt: &'a dyn PromptPort,
    pub totp: &'a dyn TotpProvider,
    pub config: &'a FlowConfig,
}

impl FlowDeps<'_> {
    async fn click_and_settle(&self, selector: &str) {
        util::try_click(self.page, selector, self.config.click_timeout_ms).await;
        util::settle(self.page, self.config.quiescence_timeout_ms).await;
    }
}

/// Run the handler for `state`; `Ok(false)` asks the orchestrator to
/// abort the attempt.
pub async fn dispatch(
    deps: &FlowDeps<'_>,
    state: LoginState,
    account: &Account,
) -> LoginResult<bool> {
    match state {
        LoginState::AccountLocked => Err(LoginError::AccountLocked),

        LoginState::ErrorAlert => {
            let text = util::text_of(
                deps.page,
                selectors::ERROR_BANNER,
                deps.config.probe_timeout_ms,
            )
            .await
            .unwrap_or_else(|| "unreadable error banner".into());
            Err(LoginError::ErrorAlert { text })
        }

        LoginState::EmailInput => {
            let prefilled = util::probe(
                deps.page,
                selectors::DISPLAY_NAME,
                deps.config.probe_timeout_ms,
            )
            .await;
            if prefilled {
                debug!("account tile already carries the email, not re-filling");
            } else {
                util::try_fill(deps.page, selectors::EMAIL_FIELD, &account.email).await;
            }
            deps.click_and_settle(selectors::SUBMIT_ANY).await;
            Ok(true)
        }

        LoginState::PasswordInput => match account.password.as_deref() {
            Some(password) if !password.is_empty() => {
                util::try_fill(deps.page, selectors::PASSWORD_FIELD, password).await;
                deps.click_and_settle(selectors::SUBMIT_ANY).await;
                Ok(true)
            }
            _ => {
                warn!("password screen shown but no password is configured");
                Ok(false)
            }
        },

        LoginState::GetACode => {
            // With a password on file the footer link skips the emailed
            // code entirely.
            deps.click_and_settle(selectors::FOOTER_SWITCH_LINK).await;
            Ok(true)
        }

        LoginState::GetACode2 => {
            deps.click_and_settle(selectors::PRIMARY_BUTTON).await;
            flows::manual_code(deps, false).await?;
            Ok(true)
        }

        LoginState::SignInAnotherWayEmail => {
            let new_tile = util::probe(
                deps.page,
                selectors::EMAIL_TILE_NEW,
                deps.config.probe_timeout_ms,
            )
            .await;
            let tile = if new_tile {
                selectors::EMAIL_TILE_NEW
            } else {
                selectors::EMAIL_TILE_OLD
            };
            deps.click_and_settle(tile).await;
            flows::manual_code(deps, false).await?;
            Ok(true)
        }

        LoginState::RecoveryEmailInput => {
            flows::recovery_email(deps, account).await?;
            Ok(true)
        }

        LoginState::ChromeWebDataError => {
            info!("tab landed on the browser error placeholder, re-navigating");
            if let Err(err) = deps
                .page
                .navigate(&deps.config.portal_base_url, WaitPolicy::DomReady)
                .await
            {
                debug!(%err, "portal navigation failed, trying the identity fallback");
                if let Err(err) = deps
                    .page
                    .navigate(&deps.config.fallback_identity_url, WaitPolicy::DomReady)
                    .await
                {
                    debug!(%err, "fallback navigation failed as well");
                }
            }
            Ok(true)
        }

        LoginState::TwoFactorTotp => {
            flows::totp(deps, account).await?;
            Ok(true)
        }

        LoginState::SignInAnotherWay => {
            deps.click_and_settle(selectors::USE_PASSWORD_TILE).await;
            Ok(true)
        }

        LoginState::KmsiPrompt => {
            // "Yes, keep me signed in" so the cookies outlive the tab.
            deps.click_and_settle(selectors::SUBMIT_ANY).await;
            Ok(true)
        }

        LoginState::PasskeyVideo | LoginState::PasskeyError => {
            deps.click_and_settle(selectors::SECONDARY_BUTTON).await;
            Ok(true)
        }

        LoginState::LoginPasswordless => {
            flows::passwordless(deps).await?;
            Ok(true)
        }

        LoginState::OtpCodeEntry => {
            deps.click_and_settle(selectors::FOOTER_SWITCH_LINK).await;
            Ok(true)
        }

        // The loop exits on LoggedIn before dispatching.
        LoginState::LoggedIn => Ok(true),

        LoginState::Unknown => {
            debug!("unrecognized screen, waiting for it to settle");
            Ok(true)
        }
    }
}
