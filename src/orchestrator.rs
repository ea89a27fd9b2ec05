//! Top-level login loop: classify, check for a stuck screen, dispatch
//! the state handler, repeat until `LoggedIn` or the budget runs out.

use std::sync::Arc;

use page_port::PagePort;
use tokio::time::{sleep, Duration};
use tracing::{info, instrument, warn};

use crate::{
    account::Account,
    config::FlowConfig,
    errors::{LoginError, LoginResult},
    finalize::{self, SessionArtifacts},
    handlers::{self, FlowDeps},
    ports::{PromptPort, SessionSink, TotpProvider},
    state::{classify, LoginState},
};

/// Drives one browser tab through sign-in for one account.
///
/// Holds no cross-account state: every counter below lives inside
/// [`LoginOrchestrator::run`], so concurrent attempts only need their
/// own page port.
pub struct LoginOrchestrator {
    page: Arc<dyn PagePort>,
    prompt: Arc<dyn PromptPort>,
    totp: Arc<dyn TotpProvider>,
    sink: Arc<dyn SessionSink>,
    config: FlowConfig,
}

/// Loop-local bookkeeping for the stuck detector.
struct LoopCounters {
    iteration: u32,
    previous: LoginState,
    same_state_count: u32,
}

impl LoginOrchestrator {
    pub fn new(
        page: Arc<dyn PagePort>,
        prompt: Arc<dyn PromptPort>,
        totp: Arc<dyn TotpProvider>,
        sink: Arc<dyn SessionSink>,
        config: FlowConfig,
    ) -> Self {
        Self {
            page,
            prompt,
            totp,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Run the full attempt: sign in, then finalize the session.
    #[instrument(skip_all, fields(account = %account.email))]
    pub async fn run(&self, account: &Account) -> LoginResult<SessionArtifacts> {
        self.sign_in(account).await?;
        finalize::finalize_session(
            self.page.as_ref(),
            self.sink.as_ref(),
            account,
            &self.config,
        )
        .await
    }

    /// The classify-dispatch loop, up to `max_iterations` cycles.
    #[instrument(skip_all, fields(account = %account.email))]
    pub async fn sign_in(&self, account: &Account) -> LoginResult<()> {
        let deps = FlowDeps {
            page: self.page.as_ref(),
            prompt: self.prompt.as_ref(),
            totp: self.totp.as_ref(),
            config: &self.config,
        };

        let mut counters = LoopCounters {
            iteration: 0,
            previous: LoginState::Unknown,
            same_state_count: 0,
        };

        while counters.iteration < self.config.max_iterations {
            counters.iteration += 1;

            if self.page.is_closed() {
                return Err(LoginError::PageClosed);
            }

            let state = classify(self.page.as_ref(), account, &self.config).await?;
            info!(iteration = counters.iteration, %state, "login state");

            if state == counters.previous
                && state != LoginState::LoggedIn
                && state != LoginState::Unknown
            {
                counters.same_state_count += 1;
                if counters.same_state_count >= self.config.same_state_limit {
                    warn!(%state, "stuck on the same screen, forcing a reload");
                    if let Err(err) = self.page.reload().await {
                        warn!(%err, "reload failed");
                    }
                    counters.same_state_count = 0;
                    counters.previous = LoginState::Unknown;
                    sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
                    continue;
                }
            } else {
                counters.same_state_count = 0;
            }
            counters.previous = state;

            if state == LoginState::LoggedIn {
                info!(iterations = counters.iteration, "login succeeded");
                return Ok(());
            }

            let proceed = handlers::dispatch(&deps, state, account).await?;
            if !proceed {
                return Err(LoginError::Aborted { state });
            }

            sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
        }

        Err(LoginError::IterationBudget {
            limit: self.config.max_iterations,
        })
    }
}
