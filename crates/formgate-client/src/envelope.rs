//! Backend response envelope.
//!
//! Every backend response has the same top-level shape:
//!
//! ```json
//! { "ok": true, "code": "OK", "message": null, "data": { ... }, "meta": null }
//! ```
//!
//! Validation failures (422) carry per-field details in
//! `meta.fields[] = { field, message, type }`.

use serde::Deserialize;

use formgate_state::RemoteFieldError;

/// Top-level response body.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Domain-level success flag.
    pub ok: bool,
    /// Domain result code (e.g., `OK`, `VALIDATION_ERROR`).
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// The payload.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

/// Optional response metadata. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    /// Field-level validation failures.
    #[serde(default)]
    pub fields: Vec<RemoteFieldError>,
}

impl<T> Envelope<T> {
    /// Field-level failures, if the backend reported any.
    pub fn field_errors(&self) -> Vec<RemoteFieldError> {
        self.meta
            .as_ref()
            .map(|m| m.fields.clone())
            .unwrap_or_default()
    }
}
