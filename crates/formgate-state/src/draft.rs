//! # Draft State
//!
//! Raw, unvalidated field values as the user typed them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name → raw input value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftState {
    values: Map<String, Value>,
}

impl DraftState {
    /// An empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    /// Remove one field.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.values.remove(field)
    }

    /// Current value of one field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Remove every field.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The draft as a candidate record for validation.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DraftState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
