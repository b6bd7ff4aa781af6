// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The uniform contract shared by every pipeline stage.
//!
//! Stages come in three structural variants, tagged by [`OperatorKind`]:
//!
//! * **Input** originates entries and never receives them.
//! * **Output** terminates the chain and never forwards.
//! * **Transformer** (parsers included) rewrites an entry and forwards it.
//!
//! Capabilities such as labeling, resource stamping and downstream links are
//! attached by composing the helpers in [`crate::operator::helper`].
//!
//! Processing is a synchronous call chain: `process` awaits `process` on each
//! downstream operator, in order, before returning.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::entry::Entry;
use crate::errors::{ConfigError, ProcessingError};
use crate::operator::Logger;

/// Structural variant of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Input,
    Output,
    Transformer,
}

#[async_trait]
pub trait Operator: Send + Sync {
    /// Unique within a pipeline.
    fn id(&self) -> &str;

    /// The registry name this operator was built from.
    fn type_name(&self) -> &str;

    fn kind(&self) -> OperatorKind;

    /// Logger scoped to this operator.
    fn logger(&self) -> &Logger;

    fn can_process(&self) -> bool {
        self.kind() != OperatorKind::Input
    }

    fn can_output(&self) -> bool {
        self.kind() != OperatorKind::Output
    }

    /// Configured downstream operator IDs, in order.
    fn output_ids(&self) -> Vec<String>;

    /// Linked downstream operators, in order.
    fn outputs(&self) -> Vec<Arc<dyn Operator>>;

    /// Links downstream operators by picking this operator's configured outputs
    /// out of `operators`. Build-time only; never concurrent with `process`.
    fn set_outputs(&self, operators: &[Arc<dyn Operator>]) -> Result<(), ConfigError>;

    async fn start(&self) -> Result<(), ProcessingError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), ProcessingError> {
        Ok(())
    }

    /// Handles one entry. `cancel` is observed by anything that blocks.
    async fn process(
        &self,
        cancel: &CancellationToken,
        entry: &mut Entry,
    ) -> Result<(), ProcessingError>;
}

impl std::fmt::Debug for dyn Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator")
            .field("id", &self.id())
            .field("type", &self.type_name())
            .field("kind", &self.kind())
            .finish()
    }
}
