// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::entry::{value_kind, Entry};
use crate::errors::{ConfigError, ConfigErrorKind, ProcessingError};
use crate::operator::helper::{ParserConfig, ParserOperator};
use crate::operator::{BuildContext, Logger};
use crate::traits::{Builder, Operator, OperatorKind};

pub const TYPE_NAME: &str = "csv_parser";

const DEFAULT_DELIMITER: &str = ",";

/// Configuration for the CSV parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvParserConfig {
    #[serde(flatten)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

impl CsvParserConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            parser: ParserConfig::new(id, TYPE_NAME),
            header: String::new(),
            delimiter: None,
        }
    }

    fn validate(&self) -> Result<(u8, Vec<String>), ConfigErrorKind> {
        if self.header.is_empty() {
            return Err(ConfigErrorKind::MissingRequiredField("header"));
        }

        let delimiter = self.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER);
        let byte = match delimiter.as_bytes() {
            [byte] if byte.is_ascii() => *byte,
            _ => return Err(ConfigErrorKind::InvalidDelimiter(delimiter.to_string())),
        };

        if !self.header.contains(delimiter) {
            return Err(ConfigErrorKind::MissingHeaderDelimiter);
        }

        let header = self.header.split(delimiter).map(str::to_string).collect();
        Ok((byte, header))
    }
}

impl Builder for CsvParserConfig {
    fn id(&self) -> &str {
        self.parser.transformer.writer.basic.id()
    }

    fn type_name(&self) -> &str {
        &self.parser.transformer.writer.basic.operator_type
    }

    fn build(&self, context: &BuildContext) -> Result<Arc<dyn Operator>, ConfigError> {
        let parser = self.parser.build(context)?;
        let (delimiter, header) = self
            .validate()
            .map_err(|kind| ConfigError::new(self.id(), kind))?;

        Ok(Arc::new(CsvParser {
            parser,
            header,
            delimiter,
        }))
    }
}

/// CSV parser - maps each delimited value to its header name
pub struct CsvParser {
    parser: ParserOperator,
    header: Vec<String>,
    delimiter: u8,
}

impl CsvParser {
    /// Parses `value` against the configured header. When the input holds
    /// several records the last one wins.
    fn parse(&self, value: &Value) -> Result<Value, ProcessingError> {
        let text = match value {
            Value::String(text) => text,
            other => {
                return Err(ProcessingError::UnsupportedValue {
                    found: value_kind(other),
                    format: "csv",
                })
            }
        };

        let mut reader = ::csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut parsed = Map::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| ProcessingError::Parse(e.to_string()))?;
            if record.len() != self.header.len() {
                let line = record
                    .position()
                    .map(|position| position.line())
                    .unwrap_or(index as u64 + 1);
                return Err(ProcessingError::Parse(format!(
                    "record on line {}: wrong number of fields",
                    line
                )));
            }

            parsed = self
                .header
                .iter()
                .zip(record.iter())
                .map(|(name, field)| (name.clone(), Value::String(field.to_string())))
                .collect();
        }

        Ok(Value::Object(parsed))
    }
}

#[async_trait]
impl Operator for CsvParser {
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
        self.parser
            .process_with(cancel, entry, |value| self.parse(value))
            .await
    }
}
