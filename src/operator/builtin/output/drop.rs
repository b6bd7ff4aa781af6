// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::entry::Entry;
use crate::errors::{ConfigError, ProcessingError};
use crate::operator::helper::{OutputConfig, OutputOperator};
use crate::operator::{BuildContext, Logger};
use crate::traits::{Builder, Operator, OperatorKind};

pub const TYPE_NAME: &str = "drop_output";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropOutputConfig {
    #[serde(flatten)]
    pub output: OutputConfig,
}

impl DropOutputConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            output: OutputConfig::new(id, TYPE_NAME),
        }
    }
}

impl Builder for DropOutputConfig {
    fn id(&self) -> &str {
        self.output.basic.id()
    }

    fn type_name(&self) -> &str {
        &self.output.basic.operator_type
    }

    fn build(&self, context: &BuildContext) -> Result<Arc<dyn Operator>, ConfigError> {
        Ok(Arc::new(DropOutput {
            output: self.output.build(context)?,
        }))
    }
}

/// Drop output - discards every entry
pub struct DropOutput {
    output: OutputOperator,
}

#[async_trait]
impl Operator for DropOutput {
    fn id(&self) -> &str {
        self.output.id()
    }

    fn type_name(&self) -> &str {
        self.output.type_name()
    }

    fn kind(&self) -> OperatorKind {
        OperatorKind::Output
    }

    fn logger(&self) -> &Logger {
        self.output.logger()
    }

    fn output_ids(&self) -> Vec<String> {
        Vec::new()
    }

    fn outputs(&self) -> Vec<Arc<dyn Operator>> {
        self.output.outputs()
    }

    fn set_outputs(&self, operators: &[Arc<dyn Operator>]) -> Result<(), ConfigError> {
        self.output.set_outputs(operators)
    }

    async fn process(
        &self,
        _cancel: &CancellationToken,
        _entry: &mut Entry,
    ) -> Result<(), ProcessingError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigErrorKind;
    use crate::testutil::{self, FakeOutput};

    #[tokio::test]
    async fn test_output_invariants() {
        let operator = DropOutputConfig::new("sink")
            .build(&testutil::build_context())
            .unwrap();

        assert!(operator.can_process());
        assert!(!operator.can_output());
        assert!(operator.outputs().is_empty());
        assert!(operator.output_ids().is_empty());
        assert!(operator.set_outputs(&[]).is_ok());

        let other = FakeOutput::new("other");
        let err = operator
            .set_outputs(&[other as Arc<dyn Operator>])
            .unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::CannotOutput);
        assert_eq!(err.operator_id, "sink");

        operator
            .process(&CancellationToken::new(), &mut Entry::new())
            .await
            .unwrap();
    }
}
