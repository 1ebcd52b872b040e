//! # Submission Status State Machine
//!
//! Tracks the single validation/submission attempt a form may have in
//! flight.
//!
//! ## States
//!
//! ```text
//! Idle ──▶ Validating ──▶ Submitting ──▶ Succeeded ──▶ Idle (consumed)
//!              │               │
//!              └──▶ Failed ◀───┘
//!                     │
//!                     └──▶ Idle (consumed)
//! ```
//!
//! A submit-intent while `Validating` or `Submitting` is rejected, never
//! queued. [`SubmissionStatus::next`] is a pure transition function; the
//! controller applies it and records the result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use formgate_core::Timestamp;

// ─── Status ──────────────────────────────────────────────────────────

/// Why an attempt ended in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The draft did not pass the composite validator.
    Validation,
    /// The transport reported an error.
    Transport,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Validation => "VALIDATION",
            Self::Transport => "TRANSPORT",
        })
    }
}

/// The lifecycle state of one form's submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Nothing in flight.
    #[default]
    Idle,
    /// The draft is being validated.
    Validating,
    /// The validated value has been handed to the transport.
    Submitting,
    /// The transport accepted the submission.
    Succeeded,
    /// Validation or transport failed.
    Failed {
        /// Which stage failed.
        reason: FailureReason,
    },
}

impl SubmissionStatus {
    /// Whether an attempt is in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }

    /// Whether the attempt has ended and awaits being consumed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed { .. })
    }

    /// Apply an event, returning the next status.
    ///
    /// # Errors
    ///
    /// [`TransitionError::InFlight`] for a submit-intent while an attempt
    /// is in flight; [`TransitionError::InvalidTransition`] for any other
    /// event that does not apply to the current status.
    pub fn next(self, event: SubmissionEvent) -> Result<Self, TransitionError> {
        use SubmissionEvent as E;

        match (self, event) {
            (Self::Idle, E::SubmitIntent) => Ok(Self::Validating),
            (Self::Validating | Self::Submitting, E::SubmitIntent) => {
                Err(TransitionError::InFlight {
                    state: self.to_string(),
                })
            }
            (Self::Validating, E::ValidationPassed) => Ok(Self::Submitting),
            (Self::Validating, E::ValidationFailed) => Ok(Self::Failed {
                reason: FailureReason::Validation,
            }),
            (Self::Submitting, E::TransportSucceeded) => Ok(Self::Succeeded),
            (Self::Submitting, E::TransportFailed) => Ok(Self::Failed {
                reason: FailureReason::Transport,
            }),
            (Self::Succeeded | Self::Failed { .. }, E::Consumed) => Ok(Self::Idle),
            (from, event) => Err(TransitionError::InvalidTransition {
                from: from.to_string(),
                event: event.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("IDLE"),
            Self::Validating => f.write_str("VALIDATING"),
            Self::Submitting => f.write_str("SUBMITTING"),
            Self::Succeeded => f.write_str("SUCCEEDED"),
            Self::Failed { reason } => write!(f, "FAILED({reason})"),
        }
    }
}

// ─── Events ──────────────────────────────────────────────────────────

/// Inputs that drive the status machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionEvent {
    /// The user asked to submit.
    SubmitIntent,
    /// The composite validator accepted the draft.
    ValidationPassed,
    /// The composite validator reported errors.
    ValidationFailed,
    /// The transport returned an outcome.
    TransportSucceeded,
    /// The transport returned an error.
    TransportFailed,
    /// The caller read the terminal result.
    Consumed,
}

impl std::fmt::Display for SubmissionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::SubmitIntent => "SUBMIT_INTENT",
            Self::ValidationPassed => "VALIDATION_PASSED",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::TransportSucceeded => "TRANSPORT_SUCCEEDED",
            Self::TransportFailed => "TRANSPORT_FAILED",
            Self::Consumed => "CONSUMED",
        })
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// An event that does not apply to the current status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// A submission is already in flight.
    #[error("submission already in flight (state {state})")]
    InFlight {
        /// Current state.
        state: String,
    },

    /// The event is not valid from the current state.
    #[error("invalid submission transition: {from} on {event}")]
    InvalidTransition {
        /// Current state.
        from: String,
        /// The rejected event.
        event: String,
    },
}

// ─── Transition Record ───────────────────────────────────────────────

/// Record of one applied transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Status before the transition.
    pub from: SubmissionStatus,
    /// Status after the transition.
    pub to: SubmissionStatus,
    /// The event that caused it.
    pub event: SubmissionEvent,
    /// When it was applied.
    pub at: Timestamp,
}

// ─── Tests ───────────────────────────────────────────────────────────
