// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::entry::Entry;
use crate::errors::{ConfigError, ProcessingError};
use crate::operator::helper::{OutputConfig, OutputOperator};
use crate::operator::{BuildContext, Logger};
use crate::traits::{Operator, OperatorKind};

pub(crate) fn build_context() -> BuildContext {
    BuildContext::new(Logger::new("test"))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Record,
    Fail,
    Cancel,
}

/// An output that records every entry it receives.
pub(crate) struct FakeOutput {
    output: OutputOperator,
    behavior: Behavior,
    received: Mutex<Vec<Entry>>,
}

impl FakeOutput {
    pub(crate) fn new(id: &str) -> Arc<Self> {
        Self::with_behavior(id, Behavior::Record)
    }

    /// An output whose `process` always fails.
    pub(crate) fn failing(id: &str) -> Arc<Self> {
        Self::with_behavior(id, Behavior::Fail)
    }

    /// An output that records the entry and then cancels the token it was given.
    pub(crate) fn cancelling(id: &str) -> Arc<Self> {
        Self::with_behavior(id, Behavior::Cancel)
    }

    fn with_behavior(id: &str, behavior: Behavior) -> Arc<Self> {
        let output = OutputConfig::new(id, "fake_output")
            .build(&build_context())
            .expect("fake output builds");
        Arc::new(Self {
            output,
            behavior,
            received: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn entries(&self) -> Vec<Entry> {
        self.received.lock().expect("lock").clone()
    }

    pub(crate) fn records(&self) -> Vec<Value> {
        self.entries().into_iter().map(|entry| entry.record).collect()
    }
}

#[async_trait]
impl Operator for FakeOutput {
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
        cancel: &CancellationToken,
        entry: &mut Entry,
    ) -> Result<(), ProcessingError> {
        if self.behavior == Behavior::Fail {
            return Err(ProcessingError::Output(format!("{} refused entry", self.id())));
        }
        self.received.lock().expect("lock").push(entry.clone());
        if self.behavior == Behavior::Cancel {
            cancel.cancel();
        }
        Ok(())
    }
}
