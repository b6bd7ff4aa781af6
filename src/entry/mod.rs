// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The log entry flowing through a pipeline.
//!
//! An [`Entry`] is created by an input operator for every ingested value and is
//! handed down the operator chain by mutable reference; each operator may rewrite
//! it in place before forwarding. `Clone` produces a deep copy that shares no
//! state with the original.

mod field;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::FieldError;

pub use field::{Field, RecordField};
pub(crate) use field::value_kind;

/// One structured log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub timestamp: DateTime<Utc>,
    pub record: Value,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub resource: HashMap<String, String>,
}

impl Entry {
    /// An entry with an empty record, no labels or resource keys, stamped now.
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            record: Value::Null,
            labels: HashMap::new(),
            resource: HashMap::new(),
        }
    }

    /// Reads the value at `field` without creating intermediate structure.
    pub fn get(&self, field: &Field) -> Option<Value> {
        match field {
            Field::Record(path) => path.get(&self.record).cloned(),
            Field::Label(key) => self.labels.get(key).cloned().map(Value::String),
            Field::Resource(key) => self.resource.get(key).cloned().map(Value::String),
        }
    }

    /// Writes `value` at `field`, creating intermediate mappings where the path is absent.
    pub fn set(&mut self, field: &Field, value: impl Into<Value>) -> Result<(), FieldError> {
        let value = value.into();
        match field {
            Field::Record(path) => path.set(&mut self.record, value),
            Field::Label(key) => {
                let value = string_value(field, value)?;
                self.labels.insert(key.clone(), value);
                Ok(())
            }
            Field::Resource(key) => {
                let value = string_value(field, value)?;
                self.resource.insert(key.clone(), value);
                Ok(())
            }
        }
    }

    /// Removes and returns the value at `field`. Deleting the record root leaves `null`.
    pub fn delete(&mut self, field: &Field) -> Option<Value> {
        match field {
            Field::Record(path) => path.delete(&mut self.record),
            Field::Label(key) => self.labels.remove(key).map(Value::String),
            Field::Resource(key) => self.resource.remove(key).map(Value::String),
        }
    }

    pub fn add_label(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(key.into(), value.into());
    }

    pub fn add_resource_key(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.resource.insert(key.into(), value.into());
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

fn string_value(field: &Field, value: Value) -> Result<String, FieldError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(FieldError::NonStringValue {
            field: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_entry_is_empty() {
        let entry = Entry::new();
        assert!(entry.record.is_null());
        assert!(entry.labels.is_empty());
        assert!(entry.resource.is_empty());
    }

    #[test]
    fn test_set_creates_intermediate_mappings() {
        let mut entry = Entry::new();
        entry.set(&Field::record(["a", "b", "c"]), "value").unwrap();
        assert_eq!(entry.record, json!({"a": {"b": {"c": "value"}}}));
        assert_eq!(
            entry.get(&Field::record(["a", "b", "c"])),
            Some(json!("value"))
        );
    }

    #[test]
    fn test_set_root_replaces_record() {
        let mut entry = Entry::new();
        entry.record = json!({"old": true});
        entry.set(&Field::record_root(), json!([1, 2])).unwrap();
        assert_eq!(entry.record, json!([1, 2]));
    }

    #[test]
    fn test_set_through_scalar_is_type_mismatch() {
        let mut entry = Entry::new();
        entry.record = json!({"a": 1});
        let err = entry.set(&Field::record(["a", "b"]), "x").unwrap_err();
        assert!(matches!(
            err,
            FieldError::TypeMismatch { ref segment, found: "number", .. } if segment == "b"
        ));
        // nothing was written
        assert_eq!(entry.record, json!({"a": 1}));
    }

    #[test]
    fn test_set_indexes_existing_sequence() {
        let mut entry = Entry::new();
        entry.record = json!({"items": [{"n": 1}, {"n": 2}]});
        entry.set(&Field::record(["items", "1", "n"]), 5).unwrap();
        assert_eq!(entry.record, json!({"items": [{"n": 1}, {"n": 5}]}));

        let err = entry.set(&Field::record(["items", "7"]), 1).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));
    }

    #[test]
    fn test_get_never_creates_structure() {
        let entry = Entry::new();
        assert_eq!(entry.get(&Field::record(["missing", "path"])), None);
        assert!(entry.record.is_null());
        assert_eq!(entry.get(&Field::record_root()), Some(Value::Null));
    }

    #[test]
    fn test_labels_and_resource() {
        let mut entry = Entry::new();
        entry.add_label("env", "prod");
        entry.add_resource_key("host", "a");
        entry.set(&Field::label("env"), "dev").unwrap();

        assert_eq!(entry.get(&Field::label("env")), Some(json!("dev")));
        assert_eq!(entry.get(&Field::resource("host")), Some(json!("a")));
        assert_eq!(entry.labels.len(), 1);

        let err = entry.set(&Field::resource("port"), 80).unwrap_err();
        assert!(matches!(err, FieldError::NonStringValue { .. }));
    }

    #[test]
    fn test_delete() {
        let mut entry = Entry::new();
        entry.record = json!({"a": {"b": 1, "c": 2}});
        assert_eq!(entry.delete(&Field::record(["a", "b"])), Some(json!(1)));
        assert_eq!(entry.delete(&Field::record(["a", "zz"])), None);
        assert_eq!(entry.record, json!({"a": {"c": 2}}));

        assert_eq!(entry.delete(&Field::record_root()), Some(json!({"a": {"c": 2}})));
        assert!(entry.record.is_null());
    }

    #[test]
    fn test_clone_shares_no_state() {
        let mut original = Entry::new();
        original.record = json!({"nested": {"k": "v"}});
        original.add_label("l", "1");

        let mut copy = original.clone();
        copy.set(&Field::record(["nested", "k"]), "changed").unwrap();
        copy.add_label("l", "2");

        assert_eq!(original.record, json!({"nested": {"k": "v"}}));
        assert_eq!(original.labels["l"], "1");
        assert_eq!(copy.timestamp, original.timestamp);
    }
}
