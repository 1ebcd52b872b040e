//! # formgate-core — Foundational Types
//!
//! Leaf crate of the formgate workspace. Defines the identifier newtypes and
//! the timestamp type every other crate builds on.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `FieldName`, `CaseId`, `UserId`
//!    are distinct types; a case identifier cannot be passed where a field
//!    name is expected.
//!
//! 2. **UTC-only timestamps.** `Timestamp` is always UTC, truncated to
//!    millisecond precision, rendered with a `Z` suffix.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formgate-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod temporal;

pub use error::IdentifierError;
pub use identity::{CaseId, FieldName, UserId};
pub use temporal::Timestamp;
