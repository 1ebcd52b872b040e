//! # Validation Errors
//!
//! Path-addressed failures produced by a composite validator. A single
//! validate call returns every failure at once; nothing is short-circuited.

use std::fmt;

use serde::{Deserialize, Serialize};

use formgate_core::FieldName;

/// Which layer of the composite validator produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The value failed the base schema's type/shape rules.
    Structural,
    /// The value passed structural checks but failed a business rule.
    Refinement,
}

/// One failed check at one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field the error is reported against.
    pub path: FieldName,
    /// Human-readable message (the rule's fixed message for refinements).
    pub message: String,
    /// Structural or refinement failure.
    pub kind: ViolationKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered collection of validation errors.
///
/// Structural errors come first, grouped by schema field order, followed
/// by refinement errors in the order their rules were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub(crate) fn from_vec(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the errors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Messages reported against one field, in order.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.path.as_str() == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Errors reported against one field.
    pub fn for_field(&self, field: &str) -> Self {
        Self {
            errors: self
                .errors
                .iter()
                .filter(|e| e.path.as_str() == field)
                .cloned()
                .collect(),
        }
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(path: &str, message: &str, kind: ViolationKind) -> ValidationError {
        ValidationError {
            path: FieldName::from(path),
            message: message.to_string(),
            kind,
        }
    }

    #[test]
    fn display_lists_each_error() {
        let errors = ValidationErrors::from_vec(vec![
            error("username", "required", ViolationKind::Structural),
            error("", "expected an object", ViolationKind::Structural),
        ]);
        assert_eq!(
            errors.to_string(),
            "  username: required\n  (root): expected an object"
        );
    }

    #[test]
    fn messages_for_filters_by_field() {
        let errors = ValidationErrors::from_vec(vec![
            error("username", "a", ViolationKind::Structural),
            error("email", "b", ViolationKind::Refinement),
            error("username", "c", ViolationKind::Refinement),
        ]);
        assert_eq!(errors.messages_for("username"), vec!["a", "c"]);
        assert_eq!(errors.for_field("email").len(), 1);
        assert!(errors.for_field("age").is_empty());
    }

    #[test]
    fn serializes_as_array() {
        let errors = ValidationErrors::from_vec(vec![error(
            "username",
            "cannot be blank",
            ViolationKind::Refinement,
        )]);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "path": "username",
                "message": "cannot be blank",
                "kind": "refinement"
            }])
        );
    }
}
