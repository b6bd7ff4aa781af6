// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::entry::Entry;
use crate::errors::{ConfigError, ProcessingError};
use crate::operator::helper::{TransformerConfig, TransformerOperator};
use crate::operator::{BuildContext, Logger};
use crate::traits::{Builder, Operator, OperatorKind};

pub const TYPE_NAME: &str = "noop";

/// Configuration for the noop transformer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoopConfig {
    #[serde(flatten)]
    pub transformer: TransformerConfig,
}

impl NoopConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            transformer: TransformerConfig::new(id, TYPE_NAME),
        }
    }
}

impl Builder for NoopConfig {
    fn id(&self) -> &str {
        self.transformer.writer.basic.id()
    }

    fn type_name(&self) -> &str {
        &self.transformer.writer.basic.operator_type
    }

    fn build(&self, context: &BuildContext) -> Result<Arc<dyn Operator>, ConfigError> {
        Ok(Arc::new(NoopOperator {
            transformer: self.transformer.build(context)?,
        }))
    }
}

/// Noop transformer - forwards every entry unchanged
pub struct NoopOperator {
    transformer: TransformerOperator,
}

#[async_trait]
impl Operator for NoopOperator {
    fn id(&self) -> &str {
        self.transformer.writer.id()
    }

    fn type_name(&self) -> &str {
        self.transformer.writer.type_name()
    }

    fn kind(&self) -> OperatorKind {
        OperatorKind::Transformer
    }

    fn logger(&self) -> &Logger {
        self.transformer.writer.logger()
    }

    fn output_ids(&self) -> Vec<String> {
        self.transformer.writer.output_ids().to_vec()
    }

    fn outputs(&self) -> Vec<Arc<dyn Operator>> {
        self.transformer.writer.outputs()
    }

    fn set_outputs(&self, operators: &[Arc<dyn Operator>]) -> Result<(), ConfigError> {
        self.transformer.writer.set_outputs(operators)
    }

    async fn process(
        &self,
        cancel: &CancellationToken,
        entry: &mut Entry,
    ) -> Result<(), ProcessingError> {
        self.transformer.writer.write(cancel, entry).await
    }
}
