// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::entry::Entry;
use crate::errors::{ConfigError, ProcessingError};
use crate::observability::messages::{operator::EntryFailed, StructuredLog};
use crate::operator::helper::{InputConfig, InputOperator};
use crate::operator::{BuildContext, Logger};
use crate::traits::{Builder, Operator, OperatorKind};

pub const TYPE_NAME: &str = "generate_input";

/// Configuration for the generate input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateInputConfig {
    #[serde(flatten)]
    pub input: InputConfig,
    #[serde(default)]
    pub record: Value,
    /// Number of entries to emit; 0 emits until stopped.
    #[serde(default)]
    pub count: u64,
}

impl GenerateInputConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            input: InputConfig::new(id, TYPE_NAME),
            record: Value::Null,
            count: 0,
        }
    }
}

impl Builder for GenerateInputConfig {
    fn id(&self) -> &str {
        self.input.writer.basic.id()
    }

    fn type_name(&self) -> &str {
        &self.input.writer.basic.operator_type
    }

    fn build(&self, context: &BuildContext) -> Result<Arc<dyn Operator>, ConfigError> {
        Ok(Arc::new(GenerateInput {
            inner: Arc::new(Generator {
                input: self.input.build(context)?,
                record: self.record.clone(),
                count: self.count,
            }),
            task: Mutex::new(None),
        }))
    }
}

struct Generator {
    input: InputOperator,
    record: Value,
    count: u64,
}

impl Generator {
    async fn run(&self, cancel: CancellationToken) {
        let mut emitted = 0;
        while self.count == 0 || emitted < self.count {
            if cancel.is_cancelled() {
                break;
            }

            match self.emit(&cancel).await {
                Ok(()) => {}
                Err(ProcessingError::Cancelled) => break,
                Err(error) => self.input.writer.logger().in_scope(|| {
                    EntryFailed {
                        operator_id: self.input.writer.id(),
                        error: &error,
                    }
                    .log()
                }),
            }
            emitted += 1;
            tokio::task::yield_now().await;
        }
    }

    async fn emit(&self, cancel: &CancellationToken) -> Result<(), ProcessingError> {
        let mut entry = self.input.new_entry(self.record.clone())?;
        self.input.writer.write(cancel, &mut entry).await
    }
}

/// Generate input - emits a fixed record from a background task
pub struct GenerateInput {
    inner: Arc<Generator>,
    task: Mutex<Option<(CancellationToken, JoinHandle<()>)>>,
}

#[async_trait]
impl Operator for GenerateInput {
    fn id(&self) -> &str {
        self.inner.input.writer.id()
    }

    fn type_name(&self) -> &str {
        self.inner.input.writer.type_name()
    }

    fn kind(&self) -> OperatorKind {
        OperatorKind::Input
    }

    fn logger(&self) -> &Logger {
        self.inner.input.writer.logger()
    }

    fn output_ids(&self) -> Vec<String> {
        self.inner.input.writer.output_ids().to_vec()
    }

    fn outputs(&self) -> Vec<Arc<dyn Operator>> {
        self.inner.input.writer.outputs()
    }

    fn set_outputs(&self, operators: &[Arc<dyn Operator>]) -> Result<(), ConfigError> {
        self.inner.input.writer.set_outputs(operators)
    }

    async fn start(&self) -> Result<(), ProcessingError> {
        let mut task = self.task.lock().await;
        if task.is_some() {
            return Ok(());
        }

        let cancel = CancellationToken::new();
        let generator = Arc::clone(&self.inner);
        let token = cancel.clone();
        let handle = tokio::spawn(async move { generator.run(token).await });
        *task = Some((cancel, handle));
        Ok(())
    }

    async fn stop(&self) -> Result<(), ProcessingError> {
        let Some((cancel, handle)) = self.task.lock().await.take() else {
            return Ok(());
        };
        cancel.cancel();
        handle
            .await
            .map_err(|e| ProcessingError::Task(e.to_string()))
    }

    async fn process(
        &self,
        _cancel: &CancellationToken,
        _entry: &mut Entry,
    ) -> Result<(), ProcessingError> {
        Err(self.inner.input.reject())
    }
}
