//! Rewards-portal login orchestrator.
//!
//! Drives one browser tab through the identity provider's sign-in
//! screens until the rewards portal reports an authenticated session,
//! then finalizes that session (secondary-site check, verification
//! token, cookie handoff). Everything that touches the browser goes
//! through the [`page_port::PagePort`] boundary.

pub mod account;
pub mod config;
pub mod errors;
pub mod finalize;
pub mod orchestrator;
pub mod ports;
pub mod selectors;
pub mod state;

mod flows;
mod handlers;
mod util;

pub use account::Account;
pub use config::FlowConfig;
pub use errors::{LoginError, LoginResult};
pub use finalize::SessionArtifacts;
pub use orchestrator::LoginOrchestrator;
pub use ports::{PromptPort, SessionSink, TotpProvider};
pub use state::{classify, resolve_candidates, LoginState};

pub use page_port::{Cookie, PagePort, PortError, WaitPolicy};
