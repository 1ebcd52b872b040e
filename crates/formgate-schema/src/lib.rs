//! # formgate-schema — Structural Schemas & Field Refinement
//!
//! Builds the pure validators that gate every form submission.
//!
//! ## Structural Layer (`structural`, `object`, `json`)
//!
//! A [`StructuralSchema`] checks the type and shape of a candidate record
//! and reports, per field, which values were accepted and which were not.
//! Two providers ship with the crate:
//!
//! - [`ObjectSchema`]: fields declared in code with a [`FieldType`].
//! - [`JsonSchemaShape`]: a Draft 2020-12 JSON Schema, loaded from a JSON or
//!   YAML file and compiled with the `jsonschema` crate.
//!
//! ## Refinement Layer (`refine`)
//!
//! [`compose`] attaches ordered [`RefinementRule`]s to a schema and yields
//! a [`CompositeValidator`]. Rules run only on fields that passed the
//! structural layer, and every failure from both layers is reported at
//! once as [`ValidationErrors`].
//!
//! ## Crate Policy
//!
//! - Depends only on `formgate-core` internally.
//! - Validators are immutable and `Send + Sync`; validation never blocks.
//! - A rule targeting an undeclared field is rejected at compose time.

pub mod error;
pub mod forms;
pub mod json;
pub mod messages;
pub mod object;
pub mod refine;
pub mod structural;
pub mod violation;

pub use error::{ComposeError, SchemaError};
pub use forms::{blank_message, guest_login_validator, GuestLoginRequest};
pub use json::{load_document, JsonSchemaShape};
pub use messages::Locale;
pub use object::{FieldType, ObjectSchema, ObjectSchemaBuilder};
pub use refine::{compose, CompositeValidator, RefinementRule, Refinements, ValidatedValue};
pub use structural::{StructuralIssue, StructuralReport, StructuralSchema};
pub use violation::{ValidationError, ValidationErrors, ViolationKind};
