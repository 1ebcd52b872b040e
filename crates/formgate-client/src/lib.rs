//! # formgate-client — HTTP Transport
//!
//! Submits validated forms to the backend over HTTP and turns the response
//! envelope into a [`SubmissionOutcome`](formgate_state::SubmissionOutcome)
//! or a [`TransportError`](formgate_state::TransportError).
//!
//! ## Error Mapping
//!
//! | Response | Result |
//! |----------|--------|
//! | 2xx, `ok: true`, consistent `data` | `Ok(outcome)` |
//! | 2xx, `ok: false` | `Rejected { status, code, message, fields }` |
//! | non-2xx | `Rejected`, with `meta.fields` when the body is an envelope |
//! | 2xx, unparseable or inconsistent `data` | `MalformedResponse` |
//! | connection failure | `Unreachable` |
//! | timeout | `Timeout` |
//!
//! Requests are never retried; a failed attempt is reported once and the
//! user decides whether to submit again.

pub mod auth;
pub mod config;
pub mod envelope;

pub use auth::{AuthClient, GUEST_LOGIN_PATH};
pub use config::{ClientConfig, ConfigError};
pub use envelope::{Envelope, Meta};
