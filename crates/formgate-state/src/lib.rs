//! # formgate-state — Submission State Machine
//!
//! Drives a form from draft to a routed follow-up action.
//!
//! ## Components
//!
//! - **Status** (`status.rs`): `Idle → Validating → Submitting →
//!   Succeeded/Failed → Idle`, as a pure transition function with
//!   timestamped transition records.
//!
//! - **Controller** (`controller.rs`): owns the [`DraftState`], runs the
//!   composite validator on submit-intent, hands the validated value to a
//!   [`Transport`], and guarantees at most one attempt in flight.
//!
//! - **Router** (`router.rs`): maps a transport result to exactly one
//!   [`Action`].
//!
//! - **Dispatch** (`dispatch.rs`): delivers an action to a [`Navigator`]
//!   or a [`NotificationSink`] using a [`RouteTable`].
//!
//! ## Design
//!
//! The controller awaits the transport at a single point and holds no lock
//! across it. A submit-intent that arrives meanwhile is rejected, never
//! queued, and the draft is only cleared after a success the caller opted
//! into.

pub mod controller;
pub mod dispatch;
pub mod draft;
pub mod router;
pub mod status;
pub mod transport;

pub use controller::{
    ControllerOptions, SubmissionController, SubmitReport, TRANSITION_HISTORY_LIMIT,
};
pub use dispatch::{ActionDispatcher, Navigator, NotificationSink, RouteTable};
pub use draft::DraftState;
pub use router::{default_failure_message, Action, OutcomeRouter};
pub use status::{
    FailureReason, SubmissionEvent, SubmissionStatus, TransitionError, TransitionRecord,
};
pub use transport::{RemoteFieldError, SubmissionOutcome, Transport, TransportError};
