//! Multi-step sub-flows invoked by state handlers.
//!
//! Each flow owns its own bounded retry loop and never re-enters the
//! top-level classifier: it assumes its triggering screen stays valid
//! and only re-checks via a final error-message probe.

mod manual_code;
mod passwordless;
mod recovery;
mod totp;

pub(crate) use manual_code::manual_code;
pub(crate) use passwordless::passwordless;
pub(crate) use recovery::recovery_email;
pub(crate) use totp::totp;
