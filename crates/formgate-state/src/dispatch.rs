//! # Action Dispatch
//!
//! Delivers a routed [`Action`] to the UI collaborators: a [`Navigator`]
//! for navigation and a [`NotificationSink`] for failure notices. Each
//! action results in exactly one collaborator call.

use serde::{Deserialize, Serialize};

use formgate_schema::Locale;

use crate::router::{default_failure_message, Action, OutcomeRouter};

/// Receives navigation targets.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Receives failure notifications. Fire-and-forget.
pub trait NotificationSink {
    fn notify(&self, message: &str);
}

/// Navigation targets and the failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    /// Prefix of a case page; the case id is appended as a path segment.
    pub case_path_prefix: String,
    /// Path of the case listing.
    pub listing_path: String,
    /// Message shown when a submission fails.
    pub failure_message: String,
}

impl RouteTable {
    /// Default routes with the failure message for a locale.
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            case_path_prefix: "/case".to_string(),
            listing_path: "/rooms".to_string(),
            failure_message: default_failure_message(locale).to_string(),
        }
    }

    /// Path for a navigation action; `None` for notifications.
    pub fn path_for(&self, action: &Action) -> Option<String> {
        match action {
            Action::NavigateToCase { case_id } => Some(format!(
                "{}/{}",
                self.case_path_prefix.trim_end_matches('/'),
                case_id
            )),
            Action::NavigateToListing => Some(self.listing_path.clone()),
            Action::NotifyFailure { .. } => None,
        }
    }

    /// A router using this table's failure message.
    pub fn router(&self) -> OutcomeRouter {
        OutcomeRouter::new(self.failure_message.clone())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

/// Sends actions to a navigator and a notification sink.
#[derive(Debug)]
pub struct ActionDispatcher<N, S> {
    routes: RouteTable,
    navigator: N,
    notifications: S,
}

impl<N: Navigator, S: NotificationSink> ActionDispatcher<N, S> {
    pub fn new(routes: RouteTable, navigator: N, notifications: S) -> Self {
        Self {
            routes,
            navigator,
            notifications,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Deliver one action.
    pub fn dispatch(&self, action: &Action) {
        match action {
            Action::NotifyFailure { message } => {
                tracing::debug!(%message, "dispatching failure notification");
                self.notifications.notify(message);
            }
            Action::NavigateToCase { .. } | Action::NavigateToListing => {
                if let Some(path) = self.routes.path_for(action) {
                    tracing::debug!(%path, "dispatching navigation");
                    self.navigator.navigate(&path);
                }
            }
        }
    }
}
