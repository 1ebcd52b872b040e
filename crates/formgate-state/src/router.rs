//! # Outcome Router
//!
//! Maps the result of a submission to exactly one follow-up action.
//! Branches are mutually exclusive and routing is pure: it never touches
//! the draft and never retries.

use serde::{Deserialize, Serialize};

use formgate_core::CaseId;
use formgate_schema::Locale;

use crate::controller::SubmitReport;
use crate::transport::{SubmissionOutcome, TransportError};

/// The single follow-up to a completed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Open the case the session is attached to.
    NavigateToCase {
        /// The attached case.
        case_id: CaseId,
    },
    /// Open the case listing.
    NavigateToListing,
    /// Show a failure notification.
    NotifyFailure {
        /// Message shown to the user.
        message: String,
    },
}

/// Default failure notification for a locale.
pub fn default_failure_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Login failed. Please try again.",
        Locale::Ko => "로그인에 실패했습니다. 다시 시도해주세요.",
    }
}

/// Routes submission results to [`Action`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRouter {
    failure_message: String,
}

impl OutcomeRouter {
    /// Create a router that notifies failures with a fixed message.
    pub fn new(failure_message: impl Into<String>) -> Self {
        Self {
            failure_message: failure_message.into(),
        }
    }

    /// Router with the default failure message for a locale.
    pub fn for_locale(locale: Locale) -> Self {
        Self::new(default_failure_message(locale))
    }

    /// Message carried by every [`Action::NotifyFailure`].
    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }

    /// Route a transport result.
    ///
    /// An outcome flagged `in_case` without a case id cannot name a case
    /// and routes to the listing.
    pub fn route(&self, result: &Result<SubmissionOutcome, TransportError>) -> Action {
        match result {
            Ok(SubmissionOutcome {
                in_case: true,
                current_case_id: Some(case_id),
                ..
            }) => Action::NavigateToCase {
                case_id: case_id.clone(),
            },
            Ok(_) => Action::NavigateToListing,
            Err(_) => Action::NotifyFailure {
                message: self.failure_message.clone(),
            },
        }
    }

    /// Route a controller report.
    ///
    /// Only completed submissions produce an action. Validation failures
    /// are shown inline as field errors and rejected intents are no-ops.
    pub fn route_report(&self, report: &SubmitReport) -> Option<Action> {
        match report {
            SubmitReport::Completed(result) => Some(self.route(result)),
            SubmitReport::Invalid(_) | SubmitReport::Rejected => None,
        }
    }
}

impl Default for OutcomeRouter {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}
