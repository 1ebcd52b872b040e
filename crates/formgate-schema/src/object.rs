//! # Object Schema
//!
//! A declarative record shape: an ordered list of named fields, each with
//! an atomic value type. This is the in-process [`StructuralSchema`]
//! provider used by the built-in forms.
//!
//! ## Semantics
//!
//! - Fields are checked in declaration order, so structural issues come
//!   out grouped by field order.
//! - A missing (or `null`) non-optional field fails with "required".
//! - Keys the schema does not declare are dropped from the accepted value.
//! - Text lengths count Unicode scalar values, not bytes.

use serde_json::Value;

use formgate_core::FieldName;

use crate::error::SchemaError;
use crate::messages::{Locale, MessageKey};
use crate::structural::{StructuralReport, StructuralSchema};

/// Atomic value type of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A string with optional character-count bounds (inclusive).
    Text {
        min_chars: Option<usize>,
        max_chars: Option<usize>,
    },
    /// A JSON integer with optional inclusive bounds.
    Integer { min: Option<i64>, max: Option<i64> },
    /// Any JSON number with optional inclusive bounds.
    Number { min: Option<f64>, max: Option<f64> },
    /// A JSON boolean.
    Boolean,
    /// A string in hyphenated UUID form.
    Uuid,
    /// A string equal to one of the listed options.
    OneOf(Vec<String>),
    /// The inner type, or absent/`null`.
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Any string, including the empty string.
    pub fn text() -> Self {
        Self::Text {
            min_chars: None,
            max_chars: None,
        }
    }

    /// A string of at least one character.
    pub fn non_empty_text() -> Self {
        Self::Text {
            min_chars: Some(1),
            max_chars: None,
        }
    }

    /// A string of `min..=max` characters.
    pub fn text_len(min: usize, max: usize) -> Self {
        Self::Text {
            min_chars: Some(min),
            max_chars: Some(max),
        }
    }

    /// Any integer.
    pub fn integer() -> Self {
        Self::Integer {
            min: None,
            max: None,
        }
    }

    /// An integer in `min..=max`.
    pub fn integer_range(min: i64, max: i64) -> Self {
        Self::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Any number.
    pub fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
        }
    }

    /// One of a fixed set of string options.
    pub fn one_of<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(options.into_iter().map(Into::into).collect())
    }

    /// Wrap this type so that absent or `null` values pass.
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Check one field value.
    ///
    /// Returns `Ok(None)` for an absent optional field (nothing to accept),
    /// `Ok(Some(v))` for an accepted value, `Err(message)` on failure.
    fn check(&self, value: Option<&Value>, locale: Locale) -> Result<Option<Value>, String> {
        let value = match (self, value) {
            (Self::Optional(_), None) => return Ok(None),
            (Self::Optional(_), Some(Value::Null)) => return Ok(Some(Value::Null)),
            (Self::Optional(inner), Some(v)) => return inner.check(Some(v), locale),
            (_, None) | (_, Some(Value::Null)) => {
                return Err(MessageKey::Required.render(locale));
            }
            (_, Some(v)) => v,
        };

        let failure = match self {
            Self::Text {
                min_chars,
                max_chars,
            } => match value.as_str() {
                None => Some(MessageKey::ExpectedText.render(locale)),
                Some(s) => {
                    let len = s.chars().count();
                    match (min_chars, max_chars) {
                        (Some(min), _) if len < *min => {
                            Some(MessageKey::TooShort { min: *min }.render(locale))
                        }
                        (_, Some(max)) if len > *max => {
                            Some(MessageKey::TooLong { max: *max }.render(locale))
                        }
                        _ => None,
                    }
                }
            },
            Self::Integer { min, max } => match value.as_i64() {
                None => Some(MessageKey::ExpectedInteger.render(locale)),
                Some(n) => match (min, max) {
                    (Some(min), _) if n < *min => Some(
                        MessageKey::TooSmall {
                            min: min.to_string(),
                        }
                        .render(locale),
                    ),
                    (_, Some(max)) if n > *max => Some(
                        MessageKey::TooLarge {
                            max: max.to_string(),
                        }
                        .render(locale),
                    ),
                    _ => None,
                },
            },
            Self::Number { min, max } => match value.as_f64() {
                None => Some(MessageKey::ExpectedNumber.render(locale)),
                Some(n) => match (min, max) {
                    (Some(min), _) if n < *min => Some(
                        MessageKey::TooSmall {
                            min: min.to_string(),
                        }
                        .render(locale),
                    ),
                    (_, Some(max)) if n > *max => Some(
                        MessageKey::TooLarge {
                            max: max.to_string(),
                        }
                        .render(locale),
                    ),
                    _ => None,
                },
            },
            Self::Boolean => {
                (!value.is_boolean()).then(|| MessageKey::ExpectedBoolean.render(locale))
            }
            Self::Uuid => match value.as_str() {
                None => Some(MessageKey::ExpectedText.render(locale)),
                Some(s) => uuid::Uuid::parse_str(s)
                    .is_err()
                    .then(|| MessageKey::InvalidUuid.render(locale)),
            },
            Self::OneOf(options) => match value.as_str() {
                Some(s) if options.iter().any(|o| o == s) => None,
                _ => Some(MessageKey::InvalidOption { options }.render(locale)),
            },
            Self::Optional(_) => None,
        };

        match failure {
            Some(message) => Err(message),
            None => Ok(Some(value.clone())),
        }
    }
}

/// An ordered, immutable record shape.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    names: Vec<FieldName>,
    types: Vec<FieldType>,
    locale: Locale,
}

impl ObjectSchema {
    /// Start declaring a schema.
    pub fn builder() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }

    /// The declared type of a field.
    pub fn field_type(&self, field: &str) -> Option<&FieldType> {
        self.names
            .iter()
            .position(|n| n.as_str() == field)
            .map(|i| &self.types[i])
    }

    /// Locale used for structural messages.
    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl StructuralSchema for ObjectSchema {
    fn field_names(&self) -> &[FieldName] {
        &self.names
    }

    fn check(&self, candidate: &Value) -> StructuralReport {
        let Some(object) = candidate.as_object() else {
            return StructuralReport::root_failure(MessageKey::ExpectedObject.render(self.locale));
        };

        let mut report = StructuralReport::new();
        for (name, ty) in self.names.iter().zip(&self.types) {
            match ty.check(object.get(name.as_str()), self.locale) {
                Ok(Some(value)) => report.accept(name.as_str(), value),
                Ok(None) => {}
                Err(message) => report.reject(name.clone(), message),
            }
        }
        report
    }
}

/// Builder for [`ObjectSchema`].
#[derive(Debug, Default)]
pub struct ObjectSchemaBuilder {
    fields: Vec<(FieldName, FieldType)>,
    locale: Locale,
}

impl ObjectSchemaBuilder {
    /// Declare a field. Declaration order is the field order.
    pub fn field(mut self, name: impl Into<FieldName>, ty: FieldType) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    /// Set the locale for structural messages.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Finish the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] if a field name was declared twice.
    pub fn build(self) -> Result<ObjectSchema, SchemaError> {
        let mut names: Vec<FieldName> = Vec::with_capacity(self.fields.len());
        let mut types = Vec::with_capacity(self.fields.len());
        for (name, ty) in self.fields {
            if names.contains(&name) {
                return Err(SchemaError::DuplicateField { field: name });
            }
            names.push(name);
            types.push(ty);
        }
        Ok(ObjectSchema {
            names,
            types,
            locale: self.locale,
        })
    }
}
