// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{one_or_many, BasicConfig, BasicOperator};
use crate::entry::Entry;
use crate::errors::{ConfigError, ConfigErrorKind, ProcessingError};
use crate::operator::{BuildContext, Logger};
use crate::traits::Operator;

/// Configuration for an operator that forwards entries downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    #[serde(flatten)]
    pub basic: BasicConfig,
    #[serde(
        rename = "output",
        alias = "output_ids",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub output_ids: Vec<String>,
}

impl WriterConfig {
    pub fn new(id: impl Into<String>, operator_type: impl Into<String>) -> Self {
        Self {
            basic: BasicConfig::new(id, operator_type),
            output_ids: Vec::new(),
        }
    }

    pub fn build(&self, context: &BuildContext) -> Result<WriterOperator, ConfigError> {
        let basic = self.basic.build(context)?;

        if let Some(known) = context.operator_ids() {
            if let Some(missing) = self.output_ids.iter().find(|id| !known.contains(*id)) {
                return Err(ConfigError::new(
                    basic.id,
                    ConfigErrorKind::UnknownOutput(missing.clone()),
                ));
            }
        }

        Ok(WriterOperator {
            basic,
            output_ids: self.output_ids.clone(),
            links: RwLock::new(Vec::new()),
        })
    }
}

#[derive(Debug, Clone)]
struct Link {
    id: String,
    operator: Weak<dyn Operator>,
}

/// Holds the ordered, non-owning links to downstream operators.
#[derive(Debug)]
pub struct WriterOperator {
    pub basic: BasicOperator,
    output_ids: Vec<String>,
    links: RwLock<Vec<Link>>,
}

impl WriterOperator {
    pub fn id(&self) -> &str {
        &self.basic.id
    }

    pub fn type_name(&self) -> &str {
        &self.basic.operator_type
    }

    pub fn logger(&self) -> &Logger {
        &self.basic.logger
    }

    pub fn output_ids(&self) -> &[String] {
        &self.output_ids
    }

    pub fn outputs(&self) -> Vec<Arc<dyn Operator>> {
        self.links()
            .iter()
            .filter_map(|link| link.operator.upgrade())
            .collect()
    }

    /// Resolves every configured output ID against `operators`, in configured order.
    pub fn set_outputs(&self, operators: &[Arc<dyn Operator>]) -> Result<(), ConfigError> {
        let mut links = Vec::with_capacity(self.output_ids.len());
        for output_id in &self.output_ids {
            let operator = operators
                .iter()
                .find(|operator| operator.id() == output_id)
                .ok_or_else(|| {
                    ConfigError::new(self.id(), ConfigErrorKind::UnknownOutput(output_id.clone()))
                })?;

            if !operator.can_process() {
                return Err(ConfigError::new(
                    self.id(),
                    ConfigErrorKind::OutputCannotProcess(output_id.clone()),
                ));
            }

            links.push(Link {
                id: output_id.clone(),
                operator: Arc::downgrade(operator),
            });
        }

        *self.links.write().unwrap_or_else(PoisonError::into_inner) = links;
        Ok(())
    }

    /// Hands `entry` to each output in order, stopping at the first error.
    pub async fn write(
        &self,
        cancel: &CancellationToken,
        entry: &mut Entry,
    ) -> Result<(), ProcessingError> {
        for link in self.links() {
            if cancel.is_cancelled() {
                return Err(ProcessingError::Cancelled);
            }
            let operator = link
                .operator
                .upgrade()
                .ok_or(ProcessingError::OutputGone(link.id))?;
            operator.process(cancel, entry).await?;
        }
        Ok(())
    }

    fn links(&self) -> Vec<Link> {
        self.links
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
