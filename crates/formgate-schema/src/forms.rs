//! # Built-in Forms
//!
//! Request shapes for the backend endpoints formgate submits to.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::messages::Locale;
use crate::object::{FieldType, ObjectSchema};
use crate::refine::{compose, CompositeValidator, RefinementRule};

/// Field name of the guest login username.
pub const USERNAME: &str = "username";

/// Minimum username length accepted by the backend.
pub const USERNAME_MIN_CHARS: usize = 3;

/// Maximum username length accepted by the backend.
pub const USERNAME_MAX_CHARS: usize = 32;

/// Body of `POST /api/v1/auth/guest-login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestLoginRequest {
    /// Display name for the guest session.
    pub username: String,
}

/// Message for a text field that contains only whitespace.
pub fn blank_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "cannot be blank",
        Locale::Ko => "공백만 입력할 수 없습니다",
    }
}

/// Validator for the guest login form.
///
/// `username` must be 3 to 32 characters and must not be whitespace only.
pub fn guest_login_validator(locale: Locale) -> Result<CompositeValidator, SchemaError> {
    let schema = ObjectSchema::builder()
        .field(USERNAME, FieldType::text_len(USERNAME_MIN_CHARS, USERNAME_MAX_CHARS))
        .locale(locale)
        .build()?;
    let validator = compose(
        schema,
        RefinementRule::not_blank(USERNAME, blank_message(locale)),
    )?;
    Ok(validator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::ViolationKind;
    use serde_json::json;

    #[test]
    fn accepts_plain_username() {
        let validator = guest_login_validator(Locale::En).unwrap();
        let value = validator.validate(&json!({"username": "alex"})).unwrap();
        let request: GuestLoginRequest = value.deserialize().unwrap();
        assert_eq!(request.username, "alex");
    }

    #[test]
    fn whitespace_only_username_is_a_refinement_failure() {
        let validator = guest_login_validator(Locale::Ko).unwrap();
        let errors = validator.validate(&json!({"username": "    "})).unwrap_err();
        assert_eq!(errors.messages_for(USERNAME), vec!["공백만 입력할 수 없습니다"]);
        assert_eq!(errors.iter().next().unwrap().kind, ViolationKind::Refinement);
    }

    #[test]
    fn length_bounds_are_structural() {
        let validator = guest_login_validator(Locale::En).unwrap();
        let long = "x".repeat(33);
        for candidate in ["ab", long.as_str()] {
            let errors = validator.validate(&json!({"username": candidate})).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.iter().next().unwrap().kind, ViolationKind::Structural);
        }
        assert!(validator.validate(&json!({"username": "x".repeat(32)})).is_ok());
    }

    #[test]
    fn missing_username_is_required() {
        let validator = guest_login_validator(Locale::En).unwrap();
        let errors = validator.validate(&json!({})).unwrap_err();
        assert_eq!(errors.messages_for(USERNAME), vec!["required"]);
    }
}
