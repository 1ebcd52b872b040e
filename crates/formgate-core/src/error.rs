//! # Error Types
//!
//! Errors raised while constructing core identifiers. Validation and
//! transport failures live in their own crates.

use thiserror::Error;

/// Error constructing a domain identifier from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The identifier was empty or whitespace-only.
    #[error("{kind} must not be empty")]
    Empty {
        /// Identifier kind (e.g., "case id").
        kind: &'static str,
    },

    /// The identifier was not a valid UUID.
    #[error("invalid {kind} {value:?}: {reason}")]
    Malformed {
        /// Identifier kind.
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Parser message.
        reason: String,
    },
}
