//! # Submission Controller
//!
//! Owns one form's draft and drives validate → submit with at most one
//! attempt in flight.
//!
//! ## Concurrency
//!
//! The controller is shared by reference. Its state sits behind a
//! `parking_lot::Mutex` that is only held for synchronous bookkeeping and
//! is released before the transport is awaited, so a second submit-intent
//! arriving during the transport call observes `Submitting` and is
//! rejected instead of queued.
//!
//! Dropping a `submit()` future while the transport is awaited (a timeout,
//! a `select!` branch, a torn-down UI task) abandons the attempt. It is
//! recorded as a transport failure so the next submit-intent is accepted.
//!
//! Status changes are published on a `tokio::sync::watch` channel for UI
//! bindings that react to them (e.g., disabling the submit control).

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;

use formgate_core::Timestamp;
use formgate_schema::{CompositeValidator, ValidationErrors};

use crate::draft::DraftState;
use crate::status::{SubmissionEvent, SubmissionStatus, TransitionError, TransitionRecord};
use crate::transport::{SubmissionOutcome, Transport, TransportError};

/// Number of transition records kept; older records are discarded.
pub const TRANSITION_HISTORY_LIMIT: usize = 64;

/// Caller opt-ins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Re-validate a field each time it changes.
    pub eager_validation: bool,
    /// Clear the draft after a successful submission.
    pub clear_draft_on_success: bool,
}

/// What a submit-intent led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitReport {
    /// Another attempt was in flight; nothing happened.
    Rejected,
    /// The draft failed validation; the transport was not called.
    Invalid(ValidationErrors),
    /// The transport was called and returned.
    Completed(Result<SubmissionOutcome, TransportError>),
}

#[derive(Debug, Default)]
struct Inner {
    status: SubmissionStatus,
    draft: DraftState,
    errors: ValidationErrors,
    transitions: VecDeque<TransitionRecord>,
}

/// Holds draft values and sequences submissions through a [`Transport`].
pub struct SubmissionController<T> {
    validator: CompositeValidator,
    transport: T,
    options: ControllerOptions,
    inner: Mutex<Inner>,
    status_tx: watch::Sender<SubmissionStatus>,
}

impl<T: Transport> SubmissionController<T> {
    /// Create a controller with default options.
    pub fn new(validator: CompositeValidator, transport: T) -> Self {
        Self::with_options(validator, transport, ControllerOptions::default())
    }

    /// Create a controller with explicit options.
    pub fn with_options(
        validator: CompositeValidator,
        transport: T,
        options: ControllerOptions,
    ) -> Self {
        let (status_tx, _) = watch::channel(SubmissionStatus::Idle);
        Self {
            validator,
            transport,
            options,
            inner: Mutex::new(Inner::default()),
            status_tx,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current status.
    pub fn status(&self) -> SubmissionStatus {
        self.inner.lock().status
    }

    /// Receive every status change.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status_tx.subscribe()
    }

    /// Whether the submit control should be enabled.
    pub fn is_submit_enabled(&self) -> bool {
        !self.status().is_in_flight()
    }

    /// Snapshot of the draft.
    pub fn draft(&self) -> DraftState {
        self.inner.lock().draft.clone()
    }

    /// Latest validation errors.
    pub fn errors(&self) -> ValidationErrors {
        self.inner.lock().errors.clone()
    }

    /// Latest validation messages for one field.
    pub fn field_errors(&self, field: &str) -> Vec<String> {
        self.inner
            .lock()
            .errors
            .messages_for(field)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// The most recent transitions, oldest first, at most
    /// [`TRANSITION_HISTORY_LIMIT`] of them.
    pub fn transitions(&self) -> Vec<TransitionRecord> {
        self.inner.lock().transitions.iter().cloned().collect()
    }

    /// The validator the draft is checked against.
    pub fn validator(&self) -> &CompositeValidator {
        &self.validator
    }

    /// The transport validated drafts are handed to.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The options this controller was created with.
    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Record a field change. Allowed in any status.
    ///
    /// With eager validation on, the field's errors are recomputed;
    /// errors of other fields are left as they were.
    pub fn set_field(&self, field: &str, value: impl Into<Value>) {
        let mut inner = self.inner.lock();
        inner.draft.set(field, value);

        if self.options.eager_validation {
            let fresh = self.validator.validate_field(&inner.draft.to_value(), field);
            let errors = std::mem::take(&mut inner.errors);
            inner.errors = errors
                .into_inner()
                .into_iter()
                .filter(|e| e.path.as_str() != field)
                .chain(fresh.into_inner())
                .collect();
        }
    }

    /// Mark a terminal result as read, returning the controller to `Idle`.
    ///
    /// Returns `false` if there was nothing to acknowledge.
    pub fn acknowledge(&self) -> bool {
        let mut inner = self.inner.lock();
        if !inner.status.is_terminal() {
            return false;
        }
        self.apply(&mut inner, SubmissionEvent::Consumed).is_ok()
    }

    /// Validate the draft and, if it passes, submit it.
    ///
    /// A terminal result from a previous attempt is consumed first. If an
    /// attempt is already in flight the intent is dropped and
    /// [`SubmitReport::Rejected`] is returned.
    pub async fn submit(&self) -> SubmitReport {
        let candidate = {
            let mut inner = self.inner.lock();
            if inner.status.is_terminal() {
                let _ = self.apply(&mut inner, SubmissionEvent::Consumed);
            }
            if let Err(error) = self.apply(&mut inner, SubmissionEvent::SubmitIntent) {
                tracing::warn!(%error, "submit-intent rejected");
                return SubmitReport::Rejected;
            }
            inner.draft.to_value()
        };

        let validated = {
            let result = self.validator.validate(&candidate);
            let mut inner = self.inner.lock();
            match result {
                Ok(validated) => {
                    inner.errors = ValidationErrors::default();
                    self.settle(&mut inner, SubmissionEvent::ValidationPassed);
                    validated
                }
                Err(errors) => {
                    tracing::debug!(count = errors.len(), "draft failed validation");
                    inner.errors = errors.clone();
                    self.settle(&mut inner, SubmissionEvent::ValidationFailed);
                    return SubmitReport::Invalid(errors);
                }
            }
        };

        let in_flight = InFlight {
            controller: self,
            settled: false,
        };
        let result = self.transport.submit(&validated).await;

        {
            let mut inner = self.inner.lock();
            match &result {
                Ok(outcome) => {
                    tracing::info!(in_case = outcome.in_case, "submission succeeded");
                    if self.options.clear_draft_on_success {
                        inner.draft.clear();
                    }
                    self.settle(&mut inner, SubmissionEvent::TransportSucceeded);
                }
                Err(error) => {
                    tracing::warn!(%error, "submission failed");
                    self.settle(&mut inner, SubmissionEvent::TransportFailed);
                }
            }
        }
        in_flight.disarm();

        SubmitReport::Completed(result)
    }

    // ── Transitions ──────────────────────────────────────────────────

    fn apply(&self, inner: &mut Inner, event: SubmissionEvent) -> Result<(), TransitionError> {
        let from = inner.status;
        let to = from.next(event)?;
        if inner.transitions.len() == TRANSITION_HISTORY_LIMIT {
            inner.transitions.pop_front();
        }
        inner.transitions.push_back(TransitionRecord {
            from,
            to,
            event,
            at: Timestamp::now(),
        });
        inner.status = to;
        tracing::debug!(%from, %to, %event, "submission transition");
        self.status_tx.send_replace(to);
        Ok(())
    }

    /// Apply an event on the in-flight path. Only the attempt that moved
    /// the controller out of `Idle` reaches here, so the event applies.
    fn settle(&self, inner: &mut Inner, event: SubmissionEvent) {
        if let Err(error) = self.apply(inner, event) {
            tracing::error!(%error, "submission state out of sequence");
        }
    }
}

/// Marks an awaited transport call. Dropped without [`InFlight::disarm`],
/// the attempt is settled as a transport failure.
struct InFlight<'a, T: Transport> {
    controller: &'a SubmissionController<T>,
    settled: bool,
}

impl<T: Transport> InFlight<'_, T> {
    fn disarm(mut self) {
        self.settled = true;
    }
}

impl<T: Transport> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.controller.inner.lock();
        if inner.status == SubmissionStatus::Submitting {
            tracing::warn!("submission abandoned while awaiting the transport");
            self.controller.settle(&mut inner, SubmissionEvent::TransportFailed);
        }
    }
}

impl<T> std::fmt::Debug for SubmissionController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("status", &self.inner.lock().status)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
