// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::observability::messages::{operator::OperatorBuilt, StructuredLog};
use crate::operator::{BuildContext, Logger};

/// Identity shared by every operator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicConfig {
    /// Defaults to the type name when empty.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub operator_type: String,
}

impl BasicConfig {
    pub fn new(id: impl Into<String>, operator_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            operator_type: operator_type.into(),
        }
    }

    pub fn id(&self) -> &str {
        if self.id.is_empty() {
            &self.operator_type
        } else {
            &self.id
        }
    }

    pub fn build(&self, context: &BuildContext) -> Result<BasicOperator, ConfigError> {
        let id = self.id();
        let logger = context
            .require_logger(id)?
            .for_operator(id, &self.operator_type);

        logger.in_scope(|| {
            OperatorBuilt {
                operator_id: id,
                operator_type: &self.operator_type,
            }
            .log()
        });

        Ok(BasicOperator {
            id: id.to_string(),
            operator_type: self.operator_type.clone(),
            logger,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BasicOperator {
    pub id: String,
    pub operator_type: String,
    pub logger: Logger,
}
