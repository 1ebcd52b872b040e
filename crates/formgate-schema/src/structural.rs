//! # Structural Schema Capability
//!
//! The base-level type/shape check that refinement rules are layered on.
//! A provider declares its fields up front so that refinement targets can
//! be verified when a validator is composed, not when it is first used.

use serde_json::{Map, Value};

use formgate_core::FieldName;

/// A structural check failure scoped to one field (or the record root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralIssue {
    /// Field that failed; [`FieldName::root`] for whole-record failures.
    pub field: FieldName,
    /// Human-readable description of the failure.
    pub message: String,
}

/// Result of a structural check.
///
/// Carries both the fields that passed (with their accepted values) and
/// the issues of the fields that did not, so that refinement rules can
/// still run on the passing fields of a partially invalid record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuralReport {
    accepted: Map<String, Value>,
    issues: Vec<StructuralIssue>,
    root_failed: bool,
}

impl StructuralReport {
    /// An empty report: nothing accepted, nothing rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// A report for a candidate that is not a record at all.
    pub fn root_failure(message: impl Into<String>) -> Self {
        Self {
            accepted: Map::new(),
            issues: vec![StructuralIssue {
                field: FieldName::root(),
                message: message.into(),
            }],
            root_failed: true,
        }
    }

    /// Record an accepted field value.
    pub fn accept(&mut self, field: impl Into<String>, value: Value) {
        self.accepted.insert(field.into(), value);
    }

    /// Record a failed field. The field is removed from the accepted set.
    pub fn reject(&mut self, field: FieldName, message: impl Into<String>) {
        if field.is_root() {
            self.root_failed = true;
        } else {
            self.accepted.remove(field.as_str());
        }
        self.issues.push(StructuralIssue {
            field,
            message: message.into(),
        });
    }

    /// Values of the fields that passed, keyed by field name.
    pub fn accepted(&self) -> &Map<String, Value> {
        &self.accepted
    }

    /// All issues, in the order the provider reported them.
    pub fn issues(&self) -> &[StructuralIssue] {
        &self.issues
    }

    /// Whether the given field has at least one structural issue.
    pub fn has_failed(&self, field: &FieldName) -> bool {
        self.issues.iter().any(|i| &i.field == field)
    }

    /// Whether the candidate failed as a whole (e.g., was not an object).
    pub fn root_failed(&self) -> bool {
        self.root_failed
    }

    /// Whether the candidate passed every structural check.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consume the report, returning the accepted values and the issues.
    pub fn into_parts(self) -> (Map<String, Value>, Vec<StructuralIssue>) {
        (self.accepted, self.issues)
    }
}

/// A static record shape that can check a candidate value.
///
/// Implementations must be pure: the same candidate always yields the same
/// report. They are shared between validators and threads.
pub trait StructuralSchema: Send + Sync + std::fmt::Debug {
    /// Declared field names, in declaration order. Names are unique.
    fn field_names(&self) -> &[FieldName];

    /// Check a candidate against the shape.
    fn check(&self, candidate: &Value) -> StructuralReport;

    /// Whether the schema declares a field with this name.
    fn declares(&self, field: &str) -> bool {
        self.field_names().iter().any(|f| f.as_str() == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reject_removes_accepted_value() {
        let mut report = StructuralReport::new();
        report.accept("age", json!(3));
        report.reject(FieldName::from("age"), "too small");
        assert!(report.accepted().get("age").is_none());
        assert!(report.has_failed(&FieldName::from("age")));
        assert!(!report.root_failed());
    }

    #[test]
    fn root_failure_is_flagged() {
        let report = StructuralReport::root_failure("expected an object");
        assert!(report.root_failed());
        assert_eq!(report.issues().len(), 1);
        assert!(report.issues()[0].field.is_root());
    }
}
