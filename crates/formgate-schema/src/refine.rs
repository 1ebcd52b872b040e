//! # Field Refinement Engine
//!
//! Composes a [`StructuralSchema`] with field-scoped business rules into a
//! single [`CompositeValidator`].
//!
//! ## Evaluation Order
//!
//! 1. The structural schema checks the whole candidate.
//! 2. Every refinement rule runs, in the order it was supplied, against the
//!    structurally accepted value of its field. Rules whose field failed
//!    structurally are skipped; their check function is never invoked. If
//!    the candidate failed as a whole (not an object), no rule runs.
//!
//! The result is a success only if both layers produced no errors.
//!
//! ## Fail-Fast Configuration
//!
//! A rule naming a field the schema does not declare is a programmer error
//! and is rejected by [`compose`], before any value is validated.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use formgate_core::FieldName;

use crate::error::ComposeError;
use crate::structural::{StructuralIssue, StructuralSchema};
use crate::violation::{ValidationError, ValidationErrors, ViolationKind};

/// Signature of a refinement check: `true` means the value is acceptable.
pub type Check = dyn Fn(&Value) -> bool + Send + Sync;

/// One business-rule constraint scoped to exactly one field.
#[derive(Clone)]
pub struct RefinementRule {
    field: FieldName,
    check: Arc<Check>,
    message: String,
}

impl RefinementRule {
    /// Create a rule over the raw JSON value of a field.
    ///
    /// Absent optional fields are checked as `null`.
    pub fn new<F>(field: impl Into<FieldName>, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            check: Arc::new(check),
            message: message.into(),
        }
    }

    /// Create a rule over a string field. Non-string values (an absent
    /// optional field) are not this rule's concern and pass.
    pub fn text<F>(field: impl Into<FieldName>, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(
            field,
            move |value: &Value| value.as_str().map_or(true, |s| check(s)),
            message,
        )
    }

    /// A string field must contain something other than whitespace.
    pub fn not_blank(field: impl Into<FieldName>, message: impl Into<String>) -> Self {
        Self::text(field, |s| !s.trim().is_empty(), message)
    }

    /// The field this rule is scoped to.
    pub fn field(&self) -> &FieldName {
        &self.field
    }

    /// The fixed message reported when the check fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the check.
    pub fn passes(&self, value: &Value) -> bool {
        (self.check)(value)
    }
}

impl std::fmt::Debug for RefinementRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefinementRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// An ordered sequence of rules. Built from a single rule or from many.
#[derive(Debug, Clone, Default)]
pub struct Refinements(Vec<RefinementRule>);

impl Refinements {
    /// No rules: the composite validator behaves like the bare schema.
    pub fn none() -> Self {
        Self::default()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<RefinementRule> for Refinements {
    fn from(rule: RefinementRule) -> Self {
        Self(vec![rule])
    }
}

impl From<Vec<RefinementRule>> for Refinements {
    fn from(rules: Vec<RefinementRule>) -> Self {
        Self(rules)
    }
}

impl<const N: usize> From<[RefinementRule; N]> for Refinements {
    fn from(rules: [RefinementRule; N]) -> Self {
        Self(rules.into())
    }
}

impl FromIterator<RefinementRule> for Refinements {
    fn from_iter<I: IntoIterator<Item = RefinementRule>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A value that passed every structural check and refinement rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedValue(Value);

impl ValidatedValue {
    /// Access the validated record.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume and return the validated record.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Look up one validated field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Deserialize the validated record into a typed request.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }
}

/// Compose a structural schema with one or more refinement rules.
///
/// # Errors
///
/// Returns [`ComposeError::InvalidRefinementTarget`] if any rule names a
/// field the schema does not declare.
pub fn compose<S>(
    schema: S,
    rules: impl Into<Refinements>,
) -> Result<CompositeValidator, ComposeError>
where
    S: StructuralSchema + 'static,
{
    CompositeValidator::new(Arc::new(schema), rules.into())
}

/// A structural schema plus its ordered refinement rules.
///
/// Immutable and cheap to clone; clones share the schema and rules, so one
/// validator can back any number of forms concurrently.
#[derive(Debug, Clone)]
pub struct CompositeValidator {
    schema: Arc<dyn StructuralSchema>,
    rules: Arc<[RefinementRule]>,
    by_field: Arc<HashMap<FieldName, Vec<usize>>>,
    field_rank: Arc<HashMap<FieldName, usize>>,
}

impl CompositeValidator {
    /// Compose over an already shared schema.
    pub fn new(
        schema: Arc<dyn StructuralSchema>,
        rules: Refinements,
    ) -> Result<Self, ComposeError> {
        let rules = rules.0;

        let mut by_field: HashMap<FieldName, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            if !schema.declares(rule.field.as_str()) {
                return Err(ComposeError::InvalidRefinementTarget {
                    field: rule.field.clone(),
                    known: schema
                        .field_names()
                        .iter()
                        .map(FieldName::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
            by_field.entry(rule.field.clone()).or_default().push(index);
        }

        let field_rank = schema
            .field_names()
            .iter()
            .enumerate()
            .map(|(i, f)| (f.clone(), i))
            .collect();

        tracing::debug!(
            fields = schema.field_names().len(),
            rules = rules.len(),
            "composed validator"
        );

        Ok(Self {
            schema,
            rules: rules.into(),
            by_field: Arc::new(by_field),
            field_rank: Arc::new(field_rank),
        })
    }

    /// The underlying structural schema.
    pub fn schema(&self) -> &dyn StructuralSchema {
        self.schema.as_ref()
    }

    /// All rules, in supplied order.
    pub fn rules(&self) -> &[RefinementRule] {
        &self.rules
    }

    /// The rules scoped to one field, in supplied order.
    pub fn rules_for<'a>(&'a self, field: &str) -> impl Iterator<Item = &'a RefinementRule> + 'a {
        self.by_field
            .get(field)
            .into_iter()
            .flatten()
            .map(move |&i| &self.rules[i])
    }

    /// Validate a candidate record.
    ///
    /// Pure: the same candidate always yields the same result.
    pub fn validate(&self, candidate: &Value) -> Result<ValidatedValue, ValidationErrors> {
        let report = self.schema.check(candidate);
        let root_failed = report.root_failed();
        let (accepted, mut issues) = report.into_parts();

        // Stable: issues for the same field keep the provider's order.
        issues.sort_by_key(|issue| self.rank(&issue.field));
        let failed: HashSet<FieldName> = issues.iter().map(|i| i.field.clone()).collect();

        let mut errors: Vec<ValidationError> = issues.into_iter().map(structural_error).collect();

        if !root_failed {
            for rule in self.rules.iter() {
                if failed.contains(&rule.field) {
                    continue;
                }
                let value = accepted.get(rule.field.as_str()).unwrap_or(&Value::Null);
                if !rule.passes(value) {
                    errors.push(refinement_error(rule));
                }
            }
        }

        if errors.is_empty() {
            Ok(ValidatedValue(Value::Object(accepted)))
        } else {
            Err(ValidationErrors::from_vec(errors))
        }
    }

    /// Validate a candidate but report only the errors of one field.
    ///
    /// Used for eager, per-field feedback while the user is typing.
    pub fn validate_field(&self, candidate: &Value, field: &str) -> ValidationErrors {
        let report = self.schema.check(candidate);

        let mut errors: Vec<ValidationError> = report
            .issues()
            .iter()
            .filter(|issue| issue.field.as_str() == field)
            .cloned()
            .map(structural_error)
            .collect();

        if errors.is_empty() && !report.root_failed() {
            let value = report.accepted().get(field).unwrap_or(&Value::Null);
            errors.extend(
                self.rules_for(field)
                    .filter(|rule| !rule.passes(value))
                    .map(refinement_error),
            );
        }

        ValidationErrors::from_vec(errors)
    }

    fn rank(&self, field: &FieldName) -> usize {
        if field.is_root() {
            return 0;
        }
        self.field_rank
            .get(field)
            .map_or(usize::MAX, |rank| rank + 1)
    }
}

fn structural_error(issue: StructuralIssue) -> ValidationError {
    ValidationError {
        path: issue.field,
        message: issue.message,
        kind: ViolationKind::Structural,
    }
}

fn refinement_error(rule: &RefinementRule) -> ValidationError {
    ValidationError {
        path: rule.field.clone(),
        message: rule.message.clone(),
        kind: ViolationKind::Refinement,
    }
}
