//! Interactive entry of an emailed one-time code.

use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::{
    errors::{LoginError, LoginResult},
    handlers::FlowDeps,
    selectors, util,
};

pub(crate) fn is_six_digit_code(input: &str) -> bool {
    input.len() == 6 && input.chars().all(|c| c.is_ascii_digit())
}

/// Prompt the operator for a 6-digit code, up to the configured attempt
/// budget. The code lands in whichever of the two input surfaces the
/// current markup generation renders. With `submit` the flow also
/// presses the submit control each attempt (the authenticator fallback
/// path needs that; the emailed-code screens advance on their own).
pub(crate) async fn manual_code(deps: &FlowDeps<'_>, submit: bool) -> LoginResult<()> {
    let config = deps.config;

    for attempt in 1..=config.code_attempt_limit {
        let answer = deps
            .prompt
            .prompt_line("Enter the 6-digit code", config.prompt_timeout_secs)
            .await;

        let code = match answer {
            Some(code) if is_six_digit_code(code.trim()) => code.trim().to_string(),
            Some(other) => {
                warn!(attempt, input = %other, "rejected non-6-digit input");
                continue;
            }
            None => {
                warn!(attempt, "code prompt timed out");
                continue;
            }
        };

        let surface = if util::probe(
            deps.page,
            selectors::CODE_SURFACE_PRIMARY,
            config.probe_timeout_ms,
        )
        .await
        {
            selectors::CODE_SURFACE_PRIMARY
        } else {
            selectors::CODE_SURFACE_SECONDARY
        };

        util::try_fill(deps.page, surface, &code).await;
        if submit {
            util::try_click(deps.page, selectors::SUBMIT_ANY, config.click_timeout_ms).await;
        }
        util::settle(deps.page, config.quiescence_timeout_ms).await;
        sleep(Duration::from_millis(config.settle_delay_ms)).await;

        if util::probe(deps.page, selectors::CODE_ERROR, config.probe_timeout_ms).await {
            warn!(attempt, "code was rejected, clearing the field");
            util::try_fill(deps.page, surface, "").await;
            continue;
        }

        info!(attempt, "code accepted");
        return Ok(());
    }

    Err(LoginError::CodeEntryExhausted)
}
