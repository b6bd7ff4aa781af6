// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Path expressions addressing a location inside an [`Entry`](super::Entry).
//!
//! A field has one of three roots:
//!
//! * `$record` (or `$`) followed by any number of dotted segments, e.g. `$record.http.status`,
//!   `$.http.status` or simply `http.status`. Zero segments addresses the whole record.
//! * `$labels.<key>` addressing one flat label.
//! * `$resource.<key>` addressing one flat resource key.
//!
//! Numeric record segments index into existing sequences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::FieldError;

const RECORD_PREFIX: &str = "$record";
const LABELS_PREFIX: &str = "$labels";
const RESOURCE_PREFIX: &str = "$resource";

/// An addressable location inside an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    Record(RecordField),
    Label(String),
    Resource(String),
}

/// Ordered key/index segments below the record root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecordField {
    pub keys: Vec<String>,
}

impl Field {
    /// The whole record.
    pub fn record_root() -> Self {
        Field::Record(RecordField::default())
    }

    pub fn record<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Field::Record(RecordField {
            keys: keys.into_iter().map(Into::into).collect(),
        })
    }

    pub fn label(key: impl Into<String>) -> Self {
        Field::Label(key.into())
    }

    pub fn resource(key: impl Into<String>) -> Self {
        Field::Resource(key.into())
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::record_root()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Record(record) if record.keys.is_empty() => write!(f, "{}", RECORD_PREFIX),
            Field::Record(record) => write!(f, "{}.{}", RECORD_PREFIX, record.keys.join(".")),
            Field::Label(key) => write!(f, "{}.{}", LABELS_PREFIX, key),
            Field::Resource(key) => write!(f, "{}.{}", RESOURCE_PREFIX, key),
        }
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(FieldError::invalid(s, "field expression is empty"));
        }

        let segments = split_segments(raw)?;
        let (root, rest) = match segments.split_first() {
            Some((first, rest)) => (first.as_str(), rest),
            None => return Err(FieldError::invalid(s, "field expression is empty")),
        };

        match root {
            "$" | RECORD_PREFIX => Ok(Field::Record(RecordField {
                keys: rest.to_vec(),
            })),
            LABELS_PREFIX => flat_key(s, "labels", rest).map(Field::Label),
            RESOURCE_PREFIX => flat_key(s, "resource", rest).map(Field::Resource),
            other if other.starts_with('$') => Err(FieldError::invalid(
                s,
                format!("unrecognized root '{}'", other),
            )),
            _ => Ok(Field::Record(RecordField { keys: segments })),
        }
    }
}

impl TryFrom<String> for Field {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.to_string()
    }
}

fn split_segments(raw: &str) -> Result<Vec<String>, FieldError> {
    let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
    if segments.iter().any(String::is_empty) {
        return Err(FieldError::invalid(raw, "field contains an empty segment"));
    }
    Ok(segments)
}

fn flat_key(raw: &str, root: &str, rest: &[String]) -> Result<String, FieldError> {
    match rest {
        [key] => Ok(key.clone()),
        [] => Err(FieldError::invalid(raw, format!("{} fields require a key", root))),
        _ => Err(FieldError::invalid(
            raw,
            format!("{} fields cannot be nested", root),
        )),
    }
}

/// Name of a value's kind, used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

impl RecordField {
    pub(crate) fn get<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.keys.iter().try_fold(record, |current, key| match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Writes `value`, turning absent (null) intermediate locations into mappings.
    pub(crate) fn set(&self, record: &mut Value, value: Value) -> Result<(), FieldError> {
        let Some((last, parents)) = self.keys.split_last() else {
            *record = value;
            return Ok(());
        };

        let mut current = record;
        for key in parents {
            current = self.child_mut(current, key)?;
        }

        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        match current {
            Value::Object(map) => {
                map.insert(last.clone(), value);
                Ok(())
            }
            Value::Array(items) => {
                let slot = last
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| items.get_mut(i))
                    .ok_or_else(|| self.mismatch(last, "sequence"))?;
                *slot = value;
                Ok(())
            }
            other => Err(self.mismatch(last, value_kind(other))),
        }
    }

    pub(crate) fn delete(&self, record: &mut Value) -> Option<Value> {
        let Some((last, parents)) = self.keys.split_last() else {
            return Some(std::mem::take(record));
        };

        let mut current = record;
        for key in parents {
            current = match current {
                Value::Object(map) => map.get_mut(key)?,
                Value::Array(items) => items.get_mut(key.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        match current {
            Value::Object(map) => map.remove(last),
            Value::Array(items) => {
                let index = last.parse::<usize>().ok()?;
                (index < items.len()).then(|| items.remove(index))
            }
            _ => None,
        }
    }

    fn child_mut<'a>(&self, current: &'a mut Value, key: &str) -> Result<&'a mut Value, FieldError> {
        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        match current {
            Value::Object(map) => Ok(map.entry(key.to_string()).or_insert(Value::Null)),
            Value::Array(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| self.mismatch(key, "sequence")),
            other => Err(self.mismatch(key, value_kind(other))),
        }
    }

    fn mismatch(&self, segment: &str, found: &'static str) -> FieldError {
        FieldError::TypeMismatch {
            field: Field::Record(self.clone()).to_string(),
            segment: segment.to_string(),
            found,
        }
    }
}
