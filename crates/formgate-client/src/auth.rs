//! Typed client for the backend auth API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/api/v1/auth/guest-login` | Start a guest session |
//!
//! The response `data` is the guest's session info: `id`, `username`,
//! `in_case` and `current_case_id`. A case id is present exactly when
//! `in_case` is true; any other combination is a malformed response.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use formgate_schema::{GuestLoginRequest, ValidatedValue};
use formgate_state::{SubmissionOutcome, Transport, TransportError};

use crate::config::{ClientConfig, ConfigError};
use crate::envelope::Envelope;

/// Path of the guest login endpoint, relative to the API base URL.
pub const GUEST_LOGIN_PATH: &str = "api/v1/auth/guest-login";

/// Client for the guest login endpoint.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    guest_login_url: Url,
}

impl AuthClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            guest_login_url: config.endpoint(GUEST_LOGIN_PATH)?,
        })
    }

    /// Absolute URL of the guest login endpoint.
    pub fn guest_login_url(&self) -> &Url {
        &self.guest_login_url
    }

    /// Start a guest session.
    ///
    /// Calls `POST {api_url}/api/v1/auth/guest-login`.
    pub async fn guest_login(
        &self,
        request: &GuestLoginRequest,
    ) -> Result<SubmissionOutcome, TransportError> {
        let body = serde_json::to_value(request).map_err(|e| TransportError::MalformedResponse {
            endpoint: self.guest_login_url.to_string(),
            reason: format!("cannot encode request: {e}"),
        })?;
        self.post_guest_login(&body).await
    }

    async fn post_guest_login(&self, body: &Value) -> Result<SubmissionOutcome, TransportError> {
        let endpoint = self.guest_login_url.as_str();
        tracing::debug!(%endpoint, "POST guest login");

        let resp = self
            .http
            .post(self.guest_login_url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| send_error(endpoint, e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| send_error(endpoint, e))?;

        if !status.is_success() {
            return Err(rejection(status, &text));
        }

        let envelope: Envelope<SubmissionOutcome> =
            serde_json::from_str(&text).map_err(|e| TransportError::MalformedResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        if !envelope.ok {
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                fields: envelope.field_errors(),
                message: envelope
                    .message
                    .unwrap_or_else(|| default_message(status)),
                code: envelope.code,
            });
        }

        let outcome = envelope.data.ok_or_else(|| TransportError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: "response has no data".to_string(),
        })?;

        if !outcome.is_consistent() {
            return Err(TransportError::MalformedResponse {
                endpoint: endpoint.to_string(),
                reason: format!(
                    "in_case is {} but current_case_id is {}",
                    outcome.in_case,
                    if outcome.current_case_id.is_some() { "set" } else { "missing" }
                ),
            });
        }

        Ok(outcome)
    }
}

impl Transport for AuthClient {
    async fn submit(&self, value: &ValidatedValue) -> Result<SubmissionOutcome, TransportError> {
        self.post_guest_login(value.as_value()).await
    }
}

fn send_error(endpoint: &str, e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        TransportError::Unreachable {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    }
}

/// Build a rejection from a non-2xx response, using the envelope when the
/// body is one.
fn rejection(status: StatusCode, body: &str) -> TransportError {
    match serde_json::from_str::<Envelope<Value>>(body) {
        Ok(envelope) => TransportError::Rejected {
            status: status.as_u16(),
            fields: envelope.field_errors(),
            message: envelope
                .message
                .unwrap_or_else(|| default_message(status)),
            code: envelope.code,
        },
        Err(_) => TransportError::Rejected {
            status: status.as_u16(),
            code: None,
            message: if body.trim().is_empty() {
                default_message(status)
            } else {
                body.to_string()
            },
            fields: Vec::new(),
        },
    }
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
