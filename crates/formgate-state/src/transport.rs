//! # Transport Seam
//!
//! The controller hands a validated value to a [`Transport`] exactly once
//! per `Submitting` entry and awaits the result. How the value travels
//! (HTTP, in-process, a test double) is the implementor's concern.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use formgate_core::{CaseId, UserId};
use formgate_schema::ValidatedValue;

/// What the backend reported about the session after a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Account the session belongs to.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Display name echoed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Whether the session is currently attached to a case.
    #[serde(default)]
    pub in_case: bool,
    /// The attached case, present exactly when `in_case` is true.
    #[serde(default)]
    pub current_case_id: Option<CaseId>,
}

impl SubmissionOutcome {
    /// A session not attached to any case.
    pub fn listing() -> Self {
        Self::default()
    }

    /// A session attached to the given case.
    pub fn in_case(case_id: CaseId) -> Self {
        Self {
            in_case: true,
            current_case_id: Some(case_id),
            ..Self::default()
        }
    }

    /// `in_case` agrees with the presence of `current_case_id`.
    pub fn is_consistent(&self) -> bool {
        self.in_case == self.current_case_id.is_some()
    }
}

/// A field-level rejection reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFieldError {
    pub field: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Why a submission did not produce an outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The backend could not be reached.
    #[error("cannot reach {endpoint}: {reason}")]
    Unreachable {
        /// Endpoint URL.
        endpoint: String,
        /// Underlying connection error.
        reason: String,
    },

    /// The backend did not answer in time.
    #[error("request to {endpoint} timed out")]
    Timeout {
        /// Endpoint URL.
        endpoint: String,
    },

    /// The backend answered with an error.
    #[error("rejected by backend (status {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Application error code, if the backend sent one.
        code: Option<String>,
        /// Human-readable message from the backend.
        message: String,
        /// Per-field rejections (422 responses).
        fields: Vec<RemoteFieldError>,
    },

    /// The backend answered successfully but the body made no sense.
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        /// Endpoint URL.
        endpoint: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Delivers a validated value to the backend.
pub trait Transport: Send + Sync {
    /// Submit the value. Called once per attempt; never retried.
    fn submit(
        &self,
        value: &ValidatedValue,
    ) -> impl Future<Output = Result<SubmissionOutcome, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn submit(
        &self,
        value: &ValidatedValue,
    ) -> impl Future<Output = Result<SubmissionOutcome, TransportError>> + Send {
        T::submit(&**self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_parses_backend_guest_info() {
        let outcome: SubmissionOutcome = serde_json::from_value(json!({
            "id": "6f1c1f3c-6a1e-4d51-9d1b-5a3f8a2d9e10",
            "username": "alex",
            "in_case": true,
            "current_case_id": "42"
        }))
        .unwrap();
        assert!(outcome.in_case);
        assert_eq!(outcome.current_case_id.as_ref().map(CaseId::as_str), Some("42"));
        assert_eq!(outcome.username.as_deref(), Some("alex"));
        assert!(outcome.is_consistent());
    }

    #[test]
    fn missing_fields_default_to_listing() {
        let outcome: SubmissionOutcome = serde_json::from_value(json!({"in_case": false})).unwrap();
        assert_eq!(outcome, SubmissionOutcome::listing());
        assert!(outcome.is_consistent());
    }

    #[test]
    fn in_case_without_id_is_inconsistent() {
        let outcome = SubmissionOutcome {
            in_case: true,
            ..SubmissionOutcome::default()
        };
        assert!(!outcome.is_consistent());
    }
}
