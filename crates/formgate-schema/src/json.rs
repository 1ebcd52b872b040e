//! # JSON Schema Shapes
//!
//! A [`StructuralSchema`] provider backed by a JSON Schema (Draft 2020-12)
//! object schema, compiled once with the `jsonschema` crate.
//!
//! ## Field Attribution
//!
//! The schema's fields are the keys of its top-level `properties`. Each
//! violation is attributed to the first segment of its instance path, so
//! a nested failure under `/address/zip` is reported against `address`.
//! Missing `required` properties are reported once per missing field.
//! Any other violation at the instance root (e.g.
//! `additionalProperties: false`) is a whole-record failure.
//!
//! Violation wording comes from the `jsonschema` crate and is English; the
//! locale only affects the "required" and "expected an object" messages.

use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;

use formgate_core::FieldName;

use crate::error::SchemaError;
use crate::messages::{Locale, MessageKey};
use crate::structural::{StructuralReport, StructuralSchema};

/// An object schema compiled from a JSON Schema document.
pub struct JsonSchemaShape {
    schema_name: String,
    fields: Vec<FieldName>,
    required: Vec<FieldName>,
    validator: Validator,
    locale: Locale,
}

impl std::fmt::Debug for JsonSchemaShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchemaShape")
            .field("schema_name", &self.schema_name)
            .field("fields", &self.fields)
            .field("required", &self.required)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl JsonSchemaShape {
    /// Compile a JSON Schema object schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotAnObjectSchema`] if the document has no
    /// `properties` object, and [`SchemaError::ValidatorBuildError`] if the
    /// `jsonschema` crate rejects it.
    pub fn new(schema_name: impl Into<String>, schema: &Value) -> Result<Self, SchemaError> {
        let schema_name = schema_name.into();

        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| SchemaError::NotAnObjectSchema {
                schema_name: schema_name.clone(),
                reason: "missing top-level \"properties\" object".to_string(),
            })?;
        let fields: Vec<FieldName> =
            properties.keys().map(|k| FieldName::from(k.as_str())).collect();

        let required = match schema.get("required") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(FieldName::from)
                        .ok_or_else(|| SchemaError::NotAnObjectSchema {
                            schema_name: schema_name.clone(),
                            reason: format!("non-string entry in \"required\": {item}"),
                        })
                })
                .collect::<Result<_, _>>()?,
            Some(other) => {
                return Err(SchemaError::NotAnObjectSchema {
                    schema_name,
                    reason: format!("\"required\" must be an array, got {other}"),
                })
            }
        };

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(schema)
            .map_err(|e| SchemaError::ValidatorBuildError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            schema = %schema_name,
            fields = fields.len(),
            required = required.len(),
            "compiled JSON schema shape"
        );

        Ok(Self {
            schema_name,
            fields,
            required,
            validator,
            locale: Locale::default(),
        })
    }

    /// Load and compile a schema file (`.json`, `.yaml` or `.yml`).
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let schema = load_document(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("schema")
            .to_string();
        Self::new(name, &schema)
    }

    /// Set the locale for the messages this provider generates itself.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// The schema's name (filename or caller-supplied identifier).
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }
}

impl StructuralSchema for JsonSchemaShape {
    fn field_names(&self) -> &[FieldName] {
        &self.fields
    }

    fn check(&self, candidate: &Value) -> StructuralReport {
        let Some(object) = candidate.as_object() else {
            return StructuralReport::root_failure(MessageKey::ExpectedObject.render(self.locale));
        };

        let mut report = StructuralReport::new();
        for (key, value) in object {
            report.accept(key.as_str(), value.clone());
        }

        for field in &self.required {
            if !object.contains_key(field.as_str()) {
                report.reject(field.clone(), MessageKey::Required.render(self.locale));
            }
        }

        for error in self.validator.iter_errors(candidate) {
            let instance_path = error.instance_path.to_string();
            match first_segment(&instance_path) {
                Some(field) => report.reject(field, error.to_string()),
                None => {
                    // Missing required properties were reported per field above.
                    if error.schema_path.to_string().ends_with("required") {
                        continue;
                    }
                    report.reject(FieldName::root(), error.to_string());
                }
            }
        }

        report
    }
}

/// First reference token of a JSON Pointer, unescaped.
fn first_segment(pointer: &str) -> Option<FieldName> {
    let token = pointer.strip_prefix('/')?.split('/').next()?;
    Some(FieldName::from(token.replace("~1", "/").replace("~0", "~")))
}

/// Load a JSON or YAML document, choosing the format by file extension.
///
/// # Errors
///
/// Returns [`SchemaError::DocumentLoadError`] if the file cannot be read
/// or parsed.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    let load_error = |reason: String| SchemaError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| load_error(format!("invalid YAML: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}
