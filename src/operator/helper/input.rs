// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Identifier, IdentifierConfig, Labeler, LabelerConfig, WriterConfig, WriterOperator};
use crate::entry::{Entry, Field};
use crate::errors::{ConfigError, ProcessingError};
use crate::observability::messages::{operator::InputReceivedEntry, StructuredLog};
use crate::operator::BuildContext;

/// Configuration shared by every input operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(flatten)]
    pub writer: WriterConfig,
    #[serde(flatten)]
    pub labeler: LabelerConfig,
    #[serde(flatten)]
    pub identifier: IdentifierConfig,
    #[serde(default)]
    pub write_to: Field,
}

impl InputConfig {
    pub fn new(id: impl Into<String>, operator_type: impl Into<String>) -> Self {
        Self {
            writer: WriterConfig::new(id, operator_type),
            labeler: LabelerConfig::default(),
            identifier: IdentifierConfig::default(),
            write_to: Field::record_root(),
        }
    }

    pub fn build(&self, context: &BuildContext) -> Result<InputOperator, ConfigError> {
        let writer = self.writer.build(context)?;
        let labeler = self
            .labeler
            .build()
            .map_err(|kind| ConfigError::new(writer.id(), kind))?;
        let identifier = self
            .identifier
            .build()
            .map_err(|kind| ConfigError::new(writer.id(), kind))?;

        Ok(InputOperator {
            writer,
            labeler,
            identifier,
            write_to: self.write_to.clone(),
        })
    }
}

/// Writer + Labeler + Identifier, plus the field new values are written to.
#[derive(Debug)]
pub struct InputOperator {
    pub writer: WriterOperator,
    pub labeler: Labeler,
    pub identifier: Identifier,
    pub write_to: Field,
}

impl InputOperator {
    /// Creates an entry holding `value` at `write_to`, then labels and identifies it.
    ///
    /// A failed write aborts before labels are applied.
    pub fn new_entry(&self, value: impl Into<Value>) -> Result<Entry, ProcessingError> {
        let mut entry = Entry::new();
        entry.set(&self.write_to, value)?;
        self.labeler.label(&mut entry);
        self.identifier.identify(&mut entry);
        Ok(entry)
    }

    /// The error every input returns from `process`.
    pub fn reject(&self) -> ProcessingError {
        self.writer.logger().in_scope(|| {
            InputReceivedEntry {
                operator_id: self.writer.id(),
            }
            .log()
        });
        ProcessingError::CannotProcess
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldError;
    use crate::operator::helper::ExprStr;
    use crate::testutil;
    use serde_json::json;
    use std::collections::HashMap;

    fn input_config() -> InputConfig {
        let mut config = InputConfig::new("in", "test_input");
        config.labeler.labels = HashMap::from([("source".to_string(), ExprStr::from("unit"))]);
        config.identifier.resource = HashMap::from([("host".to_string(), ExprStr::from("h1"))]);
        config
    }

    #[test]
    fn test_new_entry_writes_labels_and_resource() {
        let mut config = input_config();
        config.write_to = Field::record(["message"]);
        let input = config.build(&testutil::build_context()).unwrap();

        let entry = input.new_entry("hello").unwrap();
        assert_eq!(entry.record, json!({"message": "hello"}));
        assert_eq!(entry.labels["source"], "unit");
        assert_eq!(entry.resource["host"], "h1");
    }

    #[test]
    fn test_new_entry_write_failure_aborts() {
        let mut config = input_config();
        config.write_to = Field::label("raw");
        let input = config.build(&testutil::build_context()).unwrap();

        let err = input.new_entry(json!({"not": "a string"})).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Field(FieldError::NonStringValue { .. })
        ));
    }

    #[test]
    fn test_deserialize_flattened() {
        let config: InputConfig = serde_json::from_value(json!({
            "id": "in",
            "type": "test_input",
            "output": ["a"],
            "labels": {"k": "v"},
            "resource": {"r": "x"},
            "write_to": "$.body",
        }))
        .unwrap();

        assert_eq!(config.writer.basic.id, "in");
        assert_eq!(config.writer.output_ids, vec!["a"]);
        assert_eq!(config.labeler.labels["k"], ExprStr::from("v"));
        assert_eq!(config.identifier.resource["r"], ExprStr::from("x"));
        assert_eq!(config.write_to, Field::record(["body"]));
    }

    #[test]
    fn test_invalid_label_expression_carries_operator_id() {
        let mut config = input_config();
        config.labeler.labels.insert("bad".to_string(), ExprStr::from("EXPR(now())"));
        let err = config.build(&testutil::build_context()).unwrap_err();
        assert_eq!(err.operator_id, "in");
    }
}
