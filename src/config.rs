use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Timing, budget and URL knobs for one login attempt.
///
/// Values arrive already parsed; this subsystem does no file or
/// environment loading of its own. The defaults mirror the behavior of
/// the production flow and are what the documented bounds (25-iteration
/// budget, 4-repeat stuck threshold, 5-attempt sub-flows, 60 s prompts
/// and approval polling) refer to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Hard cap on classify-dispatch cycles in one attempt.
    pub max_iterations: u32,
    /// Consecutive identical non-terminal classifications before a
    /// forced reload.
    pub same_state_limit: u32,
    /// Bounded wait for each visibility probe.
    pub probe_timeout_ms: u64,
    /// Pause between orchestrator iterations.
    pub settle_delay_ms: u64,
    /// Best-effort network-quiet wait after clicks and submits.
    pub quiescence_timeout_ms: u64,
    /// Bounded wait for clicks issued by state handlers.
    pub click_timeout_ms: u64,

    /// Interactive prompt timeout for code and email entry.
    pub prompt_timeout_secs: u64,
    /// Attempts allowed to the manual-code and recovery-email flows.
    pub code_attempt_limit: u32,
    /// One-second polls allowed to the passwordless approval wait.
    pub passwordless_poll_limit: u32,
    /// Spacing between passwordless polls.
    pub passwordless_poll_interval_ms: u64,

    /// Attempts allowed to each session-finalizer loop.
    pub finalize_attempt_limit: u32,
    /// Spacing between finalizer attempts.
    pub finalize_retry_delay_ms: u64,

    /// Rewards portal landing page.
    pub portal_base_url: String,
    /// Secondary site whose session confirms the cross-site cookie set.
    pub secondary_site_url: String,
    /// Where to send the tab when it lands on the browser's internal
    /// error placeholder and the portal itself will not load.
    pub fallback_identity_url: String,
    /// Host of the identity provider's credential screens.
    pub primary_identity_host: String,
    /// Hosts that mean the session is already authenticated.
    pub authenticated_hosts: Vec<String>,
    /// Host of the browser's internal error placeholder page.
    pub internal_error_host: String,
    /// URL path prefix reached after a passwordless push is approved.
    pub approval_path_prefix: String,

    /// Passed through to the persistence collaborator.
    pub session_hint: PathBuf,
    /// Whether this attempt runs under a mobile browser profile.
    pub is_mobile: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            same_state_limit: 4,
            probe_timeout_ms: 200,
            settle_delay_ms: 500,
            quiescence_timeout_ms: 3_000,
            click_timeout_ms: 2_000,

            prompt_timeout_secs: 60,
            code_attempt_limit: 5,
            passwordless_poll_limit: 60,
            passwordless_poll_interval_ms: 1_000,

            finalize_attempt_limit: 5,
            finalize_retry_delay_ms: 1_000,

            portal_base_url: "https://rewards.bing.com/".into(),
            secondary_site_url: "https://www.bing.com/".into(),
            fallback_identity_url: "https://login.live.com/login.srf".into(),
            primary_identity_host: "login.live.com".into(),
            authenticated_hosts: vec!["rewards.bing.com".into(), "account.microsoft.com".into()],
            internal_error_host: "chromewebdata".into(),
            approval_path_prefix: "/ppsecure/post".into(),

            session_hint: PathBuf::from("sessions"),
            is_mobile: false,
        }
    }
}
