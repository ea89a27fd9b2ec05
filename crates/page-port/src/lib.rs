//! Boundary between the login orchestrator and whatever drives the
//! actual browser tab (CDP adapter, WebDriver bridge, test double).
//!
//! The orchestrator only ever talks to a [`PagePort`]; it never owns the
//! browser process, the tab lifecycle, or the fingerprint/proxy setup.

mod error;
mod model;
mod port;

pub use error::PortError;
pub use model::{Cookie, WaitPolicy};
pub use port::PagePort;
