// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{TransformerConfig, TransformerOperator};
use crate::entry::{Entry, Field};
use crate::errors::{ConfigError, ProcessingError};
use crate::operator::BuildContext;

/// Configuration shared by every parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(flatten)]
    pub transformer: TransformerConfig,
    #[serde(default)]
    pub parse_from: Field,
    #[serde(default)]
    pub parse_to: Field,
}

impl ParserConfig {
    pub fn new(id: impl Into<String>, operator_type: impl Into<String>) -> Self {
        Self {
            transformer: TransformerConfig::new(id, operator_type),
            parse_from: Field::record_root(),
            parse_to: Field::record_root(),
        }
    }

    pub fn build(&self, context: &BuildContext) -> Result<ParserOperator, ConfigError> {
        Ok(ParserOperator {
            transformer: self.transformer.build(context)?,
            parse_from: self.parse_from.clone(),
            parse_to: self.parse_to.clone(),
        })
    }
}

/// A transformer that moves the value at `parse_from` through a parse
/// function and writes the result to `parse_to`.
#[derive(Debug)]
pub struct ParserOperator {
    pub transformer: TransformerOperator,
    pub parse_from: Field,
    pub parse_to: Field,
}

impl ParserOperator {
    pub async fn process_with<F>(
        &self,
        cancel: &CancellationToken,
        entry: &mut Entry,
        parse: F,
    ) -> Result<(), ProcessingError>
    where
        F: FnOnce(&Value) -> Result<Value, ProcessingError> + Send,
    {
        self.transformer
            .process_with(cancel, entry, |entry| self.parse_with(entry, parse))
            .await
    }

    /// Removes the source value, parses it and writes the result. If either the
    /// parse or the write fails the source value is put back.
    pub fn parse_with<F>(&self, entry: &mut Entry, parse: F) -> Result<(), ProcessingError>
    where
        F: FnOnce(&Value) -> Result<Value, ProcessingError>,
    {
        let original = entry
            .delete(&self.parse_from)
            .ok_or_else(|| ProcessingError::MissingField(self.parse_from.to_string()))?;

        let result = parse(&original)
            .and_then(|parsed| entry.set(&self.parse_to, parsed).map_err(ProcessingError::from));

        if let Err(error) = result {
            entry.set(&self.parse_from, original)?;
            return Err(error);
        }
        Ok(())
    }
}
