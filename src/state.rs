//! Login state detection.
//!
//! The state is a projection of the current page, recomputed from
//! scratch on every orchestrator iteration: a battery of short
//! visibility probes plus URL inspection yields a candidate set, which
//! a fixed priority order collapses to exactly one [`LoginState`].

use std::fmt;

use page_port::PagePort;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{account::Account, config::FlowConfig, errors::LoginResult, selectors, util};

/// Every sign-in screen the orchestrator knows how to handle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LoginState {
    EmailInput,
    PasswordInput,
    SignInAnotherWay,
    SignInAnotherWayEmail,
    PasskeyError,
    PasskeyVideo,
    KmsiPrompt,
    LoggedIn,
    RecoveryEmailInput,
    AccountLocked,
    ErrorAlert,
    TwoFactorTotp,
    LoginPasswordless,
    GetACode,
    GetACode2,
    OtpCodeEntry,
    ChromeWebDataError,
    Unknown,
}

impl LoginState {
    /// States that end the attempt with a raised error the moment they
    /// are classified.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, LoginState::AccountLocked | LoginState::ErrorAlert)
    }
}

impl fmt::Display for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoginState::EmailInput => "EmailInput",
            LoginState::PasswordInput => "PasswordInput",
            LoginState::SignInAnotherWay => "SignInAnotherWay",
            LoginState::SignInAnotherWayEmail => "SignInAnotherWayEmail",
            LoginState::PasskeyError => "PasskeyError",
            LoginState::PasskeyVideo => "PasskeyVideo",
            LoginState::KmsiPrompt => "KmsiPrompt",
            LoginState::LoggedIn => "LoggedIn",
            LoginState::RecoveryEmailInput => "RecoveryEmailInput",
            LoginState::AccountLocked => "AccountLocked",
            LoginState::ErrorAlert => "ErrorAlert",
            LoginState::TwoFactorTotp => "TwoFactorTotp",
            LoginState::LoginPasswordless => "LoginPasswordless",
            LoginState::GetACode => "GetACode",
            LoginState::GetACode2 => "GetACode2",
            LoginState::OtpCodeEntry => "OtpCodeEntry",
            LoginState::ChromeWebDataError => "ChromeWebDataError",
            LoginState::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Detection battery, in probe order. Several conditions map to the
/// same state because the provider ships old and new markup variants
/// side by side.
const PROBE_BATTERY: &[(&str, LoginState)] = &[
    (selectors::ERROR_BANNER, LoginState::ErrorAlert),
    (selectors::PASSWORD_FIELD, LoginState::PasswordInput),
    (selectors::EMAIL_FIELD, LoginState::EmailInput),
    (selectors::RECOVERY_EMAIL_FIELD, LoginState::RecoveryEmailInput),
    (selectors::KMSI_CHECKBOX, LoginState::KmsiPrompt),
    (selectors::PASSKEY_VIDEO, LoginState::PasskeyVideo),
    (selectors::PASSKEY_ERROR_IMAGE, LoginState::PasskeyError),
    (selectors::USE_PASSWORD_TILE, LoginState::SignInAnotherWay),
    (selectors::EMAIL_TILE_OLD, LoginState::SignInAnotherWayEmail),
    (selectors::EMAIL_TILE_NEW, LoginState::SignInAnotherWayEmail),
    (selectors::PASSWORDLESS_MARK, LoginState::LoginPasswordless),
    (selectors::TOTP_INPUT_OLD, LoginState::TwoFactorTotp),
    (selectors::TOTP_INPUT_NEW, LoginState::TwoFactorTotp),
    (selectors::OTP_CODE_INPUT, LoginState::OtpCodeEntry),
];

/// Screens that must pre-empt mere alternative paths when several
/// conditions are true at once. Locks and modal passkey prompts block
/// everything else; credential fields beat method-picker tiles.
const PRIORITY: &[LoginState] = &[
    LoginState::AccountLocked,
    LoginState::PasskeyVideo,
    LoginState::PasskeyError,
    LoginState::KmsiPrompt,
    LoginState::PasswordInput,
    LoginState::EmailInput,
    LoginState::SignInAnotherWayEmail,
    LoginState::SignInAnotherWay,
    LoginState::LoginPasswordless,
    LoginState::TwoFactorTotp,
];

/// Collapse a candidate set to one state.
///
/// Pure and order-insensitive over the priority list: any permutation
/// of the same candidates resolves identically. Candidates outside the
/// priority list only win when nothing ranked is present, in which case
/// the first candidate in probe order is kept.
pub fn resolve_candidates(candidates: &[LoginState]) -> LoginState {
    match candidates {
        [] => LoginState::Unknown,
        [single] => *single,
        _ => PRIORITY
            .iter()
            .find(|ranked| candidates.contains(*ranked))
            .copied()
            .unwrap_or(candidates[0]),
    }
}

/// Classify the current page into exactly one [`LoginState`].
///
/// The account only disambiguates `GetACode` (a password exists, the
/// code step can be bypassed) from `GetACode2` (no password, the code
/// must be requested and entered).
pub async fn classify(
    page: &dyn PagePort,
    account: &Account,
    config: &FlowConfig,
) -> LoginResult<LoginState> {
    let url = util::current_url(page).await.unwrap_or_default();
    let host = util::host_of(&url).unwrap_or_default();

    // Short-circuits: these make every other probe moot.
    if host == config.internal_error_host {
        return Ok(LoginState::ChromeWebDataError);
    }
    if util::probe(page, selectors::LOCKED_MARKER, config.probe_timeout_ms).await {
        return Ok(LoginState::AccountLocked);
    }
    if config.authenticated_hosts.iter().any(|h| *h == host) {
        return Ok(LoginState::LoggedIn);
    }

    let mut candidates: Vec<LoginState> = Vec::new();
    for (selector, state) in PROBE_BATTERY.iter().copied() {
        if util::probe(page, selector, config.probe_timeout_ms).await
            && !candidates.contains(&state)
        {
            candidates.push(state);
        }
    }

    let totp_detected = candidates.contains(&LoginState::TwoFactorTotp);
    let password_visible = candidates.contains(&LoginState::PasswordInput);

    // "Send a code to your email" landing: identity banner plus primary
    // button, with neither a password field nor an authenticator input.
    if !password_visible && !totp_detected {
        let banner = util::probe(page, selectors::IDENTITY_BANNER, config.probe_timeout_ms).await;
        let primary = util::probe(page, selectors::PRIMARY_BUTTON, config.probe_timeout_ms).await;
        if banner && primary {
            candidates.push(if account.has_password() {
                LoginState::GetACode
            } else {
                LoginState::GetACode2
            });
        }
    }

    // Authenticator screens transiently carry a stale error banner that
    // must be ignored rather than treated as fatal: keep the banner
    // candidate only when the host is the primary identity host or no
    // authenticator input was detected alongside it.
    if candidates.contains(&LoginState::ErrorAlert)
        && !(host == config.primary_identity_host || !totp_detected)
    {
        candidates.retain(|c| *c != LoginState::ErrorAlert);
    }

    let state = resolve_candidates(&candidates);
    debug!(%url, ?candidates, %state, "classified page");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidates_resolve_to_unknown() {
        assert_eq!(resolve_candidates(&[]), LoginState::Unknown);
    }

    #[test]
    fn single_candidate_wins_outright() {
        assert_eq!(
            resolve_candidates(&[LoginState::RecoveryEmailInput]),
            LoginState::RecoveryEmailInput
        );
    }

    #[test]
    fn priority_is_order_insensitive() {
        let forward = [
            LoginState::EmailInput,
            LoginState::KmsiPrompt,
            LoginState::PasswordInput,
        ];
        let backward = [
            LoginState::PasswordInput,
            LoginState::KmsiPrompt,
            LoginState::EmailInput,
        ];
        assert_eq!(resolve_candidates(&forward), LoginState::KmsiPrompt);
        assert_eq!(resolve_candidates(&backward), LoginState::KmsiPrompt);
    }

    #[test]
    fn passkey_video_preempts_credential_fields() {
        let candidates = [
            LoginState::PasswordInput,
            LoginState::EmailInput,
            LoginState::PasskeyVideo,
        ];
        assert_eq!(resolve_candidates(&candidates), LoginState::PasskeyVideo);
    }

    #[test]
    fn totp_beats_states_outside_the_priority_list() {
        let candidates = [LoginState::ErrorAlert, LoginState::TwoFactorTotp];
        assert_eq!(resolve_candidates(&candidates), LoginState::TwoFactorTotp);
    }

    #[test]
    fn unranked_candidates_fall_back_to_probe_order() {
        let candidates = [LoginState::ErrorAlert, LoginState::OtpCodeEntry];
        assert_eq!(resolve_candidates(&candidates), LoginState::ErrorAlert);
    }

    #[test]
    fn host_extraction_handles_internal_error_scheme() {
        assert_eq!(
            util::host_of("chrome-error://chromewebdata/").as_deref(),
            Some("chromewebdata")
        );
        assert_eq!(
            util::host_of("https://login.live.com/ppsecure/post.srf?x=1").as_deref(),
            Some("login.live.com")
        );
        assert_eq!(util::host_of("not a url"), None);
    }

    #[test]
    fn terminal_failures_are_exactly_lock_and_alert() {
        for state in [LoginState::AccountLocked, LoginState::ErrorAlert] {
            assert!(state.is_terminal_failure());
        }
        for state in [
            LoginState::Unknown,
            LoginState::LoggedIn,
            LoginState::TwoFactorTotp,
        ] {
            assert!(!state.is_terminal_failure());
        }
    }
}
