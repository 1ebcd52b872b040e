//! # Schema Error Types
//!
//! Configuration-time errors. These are programmer errors raised while a
//! schema or composite validator is being built; they never reach a user.
//! Per-value validation failures are data, see [`crate::ValidationErrors`].

use thiserror::Error;

use formgate_core::FieldName;

/// Error building a structural schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The same field name was declared twice.
    #[error("duplicate field '{field}' in object schema")]
    DuplicateField {
        /// The repeated field name.
        field: FieldName,
    },

    /// A JSON Schema document does not describe an object with `properties`.
    #[error("schema '{schema_name}' is not an object schema: {reason}")]
    NotAnObjectSchema {
        /// Schema filename or identifier.
        schema_name: String,
        /// Why the schema was rejected.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// A schema or document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the file that failed to load.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },

    /// An unsupported message locale was requested.
    #[error("unknown locale {0:?}; expected \"en\" or \"ko\"")]
    UnknownLocale(String),

    /// Refinement rules could not be composed with the schema.
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Error composing a structural schema with refinement rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A refinement rule targets a field the schema does not declare.
    #[error("refinement rule targets unknown field '{field}' (schema fields: {known})")]
    InvalidRefinementTarget {
        /// The field named by the offending rule.
        field: FieldName,
        /// Comma-separated list of the schema's fields.
        known: String,
    },
}
