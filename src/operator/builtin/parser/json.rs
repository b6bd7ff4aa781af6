// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::entry::{value_kind, Entry};
use crate::errors::{ConfigError, ProcessingError};
use crate::operator::helper::{ParserConfig, ParserOperator};
use crate::operator::{BuildContext, Logger};
use crate::traits::{Builder, Operator, OperatorKind};

pub const TYPE_NAME: &str = "json_parser";

/// Configuration for the JSON parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonParserConfig {
    #[serde(flatten)]
    pub parser: ParserConfig,
}

impl JsonParserConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            parser: ParserConfig::new(id, TYPE_NAME),
        }
    }
}

impl Builder for JsonParserConfig {
    fn id(&self) -> &str {
        self.parser.transformer.writer.basic.id()
    }

    fn type_name(&self) -> &str {
        &self.parser.transformer.writer.basic.operator_type
    }

    fn build(&self, context: &BuildContext) -> Result<Arc<dyn Operator>, ConfigError> {
        Ok(Arc::new(JsonParser {
            parser: self.parser.build(context)?,
        }))
    }
}

/// JSON parser - turns a JSON object string into a structured record
pub struct JsonParser {
    parser: ParserOperator,
}

fn parse(value: &Value) -> Result<Value, ProcessingError> {
    let text = match value {
        Value::String(text) => text,
        other => {
            return Err(ProcessingError::UnsupportedValue {
                found: value_kind(other),
                format: "json",
            })
        }
    };

    match serde_json::from_str::<Value>(text) {
        Ok(object @ Value::Object(_)) => Ok(object),
        Ok(other) => Err(ProcessingError::Parse(format!(
            "expected a JSON object, found {}",
            value_kind(&other)
        ))),
        Err(e) => Err(ProcessingError::Parse(e.to_string())),
    }
}

#[async_trait]
impl Operator for JsonParser {
    fn id(&self) -> &str {
        self.parser.transformer.writer.id()
    }

    fn type_name(&self) -> &str {
        self.parser.transformer.writer.type_name()
    }

    fn kind(&self) -> OperatorKind {
        OperatorKind::Transformer
    }

    fn logger(&self) -> &Logger {
        self.parser.transformer.writer.logger()
    }

    fn output_ids(&self) -> Vec<String> {
        self.parser.transformer.writer.output_ids().to_vec()
    }

    fn outputs(&self) -> Vec<Arc<dyn Operator>> {
        self.parser.transformer.writer.outputs()
    }

    fn set_outputs(&self, operators: &[Arc<dyn Operator>]) -> Result<(), ConfigError> {
        self.parser.transformer.writer.set_outputs(operators)
    }

    async fn process(
        &self,
        cancel: &CancellationToken,
        entry: &mut Entry,
    ) -> Result<(), ProcessingError> {
        self.parser.process_with(cancel, entry, parse).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Field;
    use crate::testutil::{self, FakeOutput};
    use serde_json::json;

    #[test]
    fn test_config_from_yaml() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            expected: JsonParserConfig,
        }

        let default = JsonParserConfig::new("test");
        let cases = vec![
            TestCase {
                name: "default",
                yaml: "id: test\ntype: json_parser\n",
                expected: default.clone(),
            },
            TestCase {
                name: "parse_from_simple",
                yaml: "id: test\ntype: json_parser\nparse_from: $.from\n",
                expected: {
                    let mut config = default.clone();
                    config.parser.parse_from = Field::record(["from"]);
                    config
                },
            },
            TestCase {
                name: "parse_to_simple",
                yaml: "id: test\ntype: json_parser\nparse_to: log\n",
                expected: {
                    let mut config = default.clone();
                    config.parser.parse_to = Field::record(["log"]);
                    config
                },
            },
            TestCase {
                name: "on_error_drop",
                yaml: "id: test\ntype: json_parser\non_error: drop\n",
                expected: {
                    let mut config = default.clone();
                    config.parser.transformer.on_error = Some("drop".to_string());
                    config
                },
            },
        ];

        for case in cases {
            let config: JsonParserConfig = serde_yaml::from_str(case.yaml)
                .unwrap_or_else(|e| panic!("case '{}': {}", case.name, e));
            assert_eq!(config, case.expected, "case: {}", case.name);
        }
    }

    #[test]
    fn test_parse_rejects() {
        assert!(matches!(
            parse(&json!(12)),
            Err(ProcessingError::UnsupportedValue { found: "number", format: "json" })
        ));
        assert!(matches!(parse(&json!("[1, 2]")), Err(ProcessingError::Parse(_))));
        assert!(matches!(parse(&json!("{not json")), Err(ProcessingError::Parse(_))));
    }

    #[tokio::test]
    async fn test_process_parses_object() {
        let mut config = JsonParserConfig::new("test");
        config.parser.transformer.writer.output_ids = vec!["fake".to_string()];
        config.parser.parse_from = Field::record(["message"]);
        config.parser.parse_to = Field::record(["parsed"]);
        let operator = config.build(&testutil::build_context()).unwrap();
        let fake = FakeOutput::new("fake");
        operator
            .set_outputs(&[fake.clone() as Arc<dyn Operator>])
            .unwrap();

        let mut entry = Entry::new();
        entry.record = json!({"message": "{\"level\": \"info\", \"n\": 3}"});
        operator
            .process(&CancellationToken::new(), &mut entry)
            .await
            .unwrap();

        assert_eq!(
            fake.records(),
            vec![json!({"parsed": {"level": "info", "n": 3}})]
        );
    }

    #[tokio::test]
    async fn test_process_failure_returns_error_and_restores() {
        let operator = JsonParserConfig::new("test")
            .build(&testutil::build_context())
            .unwrap();

        let mut entry = Entry::new();
        entry.record = json!("not json");
        let err = operator
            .process(&CancellationToken::new(), &mut entry)
            .await
            .unwrap_err();

        assert!(matches!(err, ProcessingError::Parse(_)));
        assert_eq!(entry.record, json!("not json"));
    }
}
