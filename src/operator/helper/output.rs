// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{BasicConfig, BasicOperator};
use crate::errors::{ConfigError, ConfigErrorKind};
use crate::operator::{BuildContext, Logger};
use crate::traits::Operator;

/// Configuration shared by every output operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(flatten)]
    pub basic: BasicConfig,
}

impl OutputConfig {
    pub fn new(id: impl Into<String>, operator_type: impl Into<String>) -> Self {
        Self {
            basic: BasicConfig::new(id, operator_type),
        }
    }

    pub fn build(&self, context: &BuildContext) -> Result<OutputOperator, ConfigError> {
        Ok(OutputOperator {
            basic: self.basic.build(context)?,
        })
    }
}

/// Terminates a pipeline: it has no outputs and refuses to be given any.
#[derive(Debug, Clone)]
pub struct OutputOperator {
    pub basic: BasicOperator,
}

impl OutputOperator {
    pub fn id(&self) -> &str {
        &self.basic.id
    }

    pub fn type_name(&self) -> &str {
        &self.basic.operator_type
    }

    pub fn logger(&self) -> &Logger {
        &self.basic.logger
    }

    pub fn outputs(&self) -> Vec<Arc<dyn Operator>> {
        Vec::new()
    }

    pub fn set_outputs(&self, operators: &[Arc<dyn Operator>]) -> Result<(), ConfigError> {
        if operators.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::new(self.id(), ConfigErrorKind::CannotOutput))
        }
    }
}
