// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::entry::Entry;
use crate::errors::{ConfigError, ProcessingError};
use crate::operator::helper::{OutputConfig, OutputOperator};
use crate::operator::{BuildContext, Logger};
use crate::traits::{Builder, Operator, OperatorKind};

pub const TYPE_NAME: &str = "stdout";

type Sink = Box<dyn AsyncWrite + Send + Unpin>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdoutConfig {
    #[serde(flatten)]
    pub output: OutputConfig,
}

impl StdoutConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            output: OutputConfig::new(id, TYPE_NAME),
        }
    }
}

impl Builder for StdoutConfig {
    fn id(&self) -> &str {
        self.output.basic.id()
    }

    fn type_name(&self) -> &str {
        &self.output.basic.operator_type
    }

    fn build(&self, context: &BuildContext) -> Result<Arc<dyn Operator>, ConfigError> {
        let output = self.output.build(context)?;
        Ok(Arc::new(StdoutOutput::new(output, tokio::io::stdout())))
    }
}

/// Stdout output - writes each entry as one JSON line
pub struct StdoutOutput {
    output: OutputOperator,
    sink: Mutex<Sink>,
}

impl StdoutOutput {
    fn new<W>(output: OutputOperator, sink: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            output,
            sink: Mutex::new(Box::new(sink)),
        }
    }
}

#[async_trait]
impl Operator for StdoutOutput {
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
        entry: &mut Entry,
    ) -> Result<(), ProcessingError> {
        let mut line =
            serde_json::to_vec(entry).map_err(|e| ProcessingError::Output(e.to_string()))?;
        line.push(b'\n');

        let mut sink = self.sink.lock().await;
        sink.write_all(&line)
            .await
            .map_err(|e| ProcessingError::Output(e.to_string()))?;
        sink.flush()
            .await
            .map_err(|e| ProcessingError::Output(e.to_string()))
    }
}
