//! # Identity Newtypes
//!
//! Newtype wrappers for the identifiers that flow through a form
//! submission. These prevent accidental identifier confusion: a
//! `CaseId` returned by the backend cannot be used as a `FieldName`.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentifierError;

/// Name of a field in a structural schema, and the path of a validation error.
///
/// The empty name denotes the record root; it is produced only for
/// errors that concern the candidate as a whole (e.g., "expected an object").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Create a field name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The record-root path.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Whether this is the record-root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Access the field name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Identifier of the case (game session) a user is currently seated in.
///
/// Opaque to the client: the backend issues UUIDs, but any non-empty
/// string is accepted so that routing never depends on the id format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaseId(String);

impl CaseId {
    /// Create a case identifier, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentifierError::Empty { kind: "case id" });
        }
        Ok(Self(id))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CaseId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CaseId> for String {
    fn from(id: CaseId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier of a (guest) user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user identifier from its hyphenated UUID form.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| IdentifierError::Malformed {
                kind: "user id",
                value: s.to_string(),
                reason: e.to_string(),
            })
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn field_name_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(FieldName::from("username"), 1);
        assert_eq!(map.get("username"), Some(&1));
    }

    #[test]
    fn root_field_displays_as_root() {
        assert!(FieldName::root().is_root());
        assert_eq!(FieldName::root().to_string(), "(root)");
        assert_eq!(FieldName::from("email").to_string(), "email");
    }

    #[test]
    fn case_id_rejects_blank() {
        assert!(CaseId::new("").is_err());
        assert!(CaseId::new("   ").is_err());
        assert_eq!(CaseId::new("42").unwrap().as_str(), "42");
    }

    #[test]
    fn case_id_deserialization_validates() {
        let id: CaseId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id.as_str(), "42");
        assert!(serde_json::from_str::<CaseId>("\"\"").is_err());
    }

    #[test]
    fn user_id_parse() {
        let id = UserId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.to_string(), "user:550e8400-e29b-41d4-a716-446655440000");
        assert!(matches!(
            UserId::parse("not-a-uuid"),
            Err(IdentifierError::Malformed { kind: "user id", .. })
        ));
    }

    #[test]
    fn user_id_serializes_as_bare_uuid() {
        let id = UserId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
    }
}
