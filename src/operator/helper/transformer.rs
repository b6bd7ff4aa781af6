// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{WriterConfig, WriterOperator};
use crate::entry::Entry;
use crate::errors::{ConfigError, ConfigErrorKind, ProcessingError};
use crate::observability::messages::{
    operator::{EntryDropped, EntryFailed, EntrySentOnError},
    StructuredLog,
};
use crate::operator::BuildContext;

/// What a transformer does with an entry whose transform failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnError {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Forward the entry downstream as the transform left it.
    Send,
    /// Discard the entry and report success.
    Drop,
}

impl OnError {
    pub fn parse(value: Option<&str>) -> Result<Self, ConfigErrorKind> {
        match value {
            None | Some("") => Ok(Self::Propagate),
            Some("send") => Ok(Self::Send),
            Some("drop") => Ok(Self::Drop),
            Some(other) => Err(ConfigErrorKind::InvalidOnError(other.to_string())),
        }
    }
}

/// Configuration shared by every transformer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerConfig {
    #[serde(flatten)]
    pub writer: WriterConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<String>,
}

impl TransformerConfig {
    pub fn new(id: impl Into<String>, operator_type: impl Into<String>) -> Self {
        Self {
            writer: WriterConfig::new(id, operator_type),
            on_error: None,
        }
    }

    pub fn build(&self, context: &BuildContext) -> Result<TransformerOperator, ConfigError> {
        let writer = self.writer.build(context)?;
        let on_error = OnError::parse(self.on_error.as_deref())
            .map_err(|kind| ConfigError::new(writer.id(), kind))?;

        Ok(TransformerOperator { writer, on_error })
    }
}

#[derive(Debug)]
pub struct TransformerOperator {
    pub writer: WriterOperator,
    pub on_error: OnError,
}

impl TransformerOperator {
    /// Applies `transform` and forwards the entry; failures go through
    /// [`handle_entry_error`](Self::handle_entry_error).
    pub async fn process_with<F>(
        &self,
        cancel: &CancellationToken,
        entry: &mut Entry,
        transform: F,
    ) -> Result<(), ProcessingError>
    where
        F: FnOnce(&mut Entry) -> Result<(), ProcessingError> + Send,
    {
        if let Err(error) = transform(entry) {
            return self.handle_entry_error(cancel, entry, error).await;
        }
        self.writer.write(cancel, entry).await
    }

    /// Applies the `on_error` policy. Downstream failures while forwarding
    /// under `send` are returned unchanged.
    pub async fn handle_entry_error(
        &self,
        cancel: &CancellationToken,
        entry: &mut Entry,
        error: ProcessingError,
    ) -> Result<(), ProcessingError> {
        let operator_id = self.writer.id();
        match self.on_error {
            OnError::Propagate => {
                self.writer.logger().in_scope(|| {
                    EntryFailed {
                        operator_id,
                        error: &error,
                    }
                    .log()
                });
                Err(error)
            }
            OnError::Send => {
                self.writer.logger().in_scope(|| {
                    EntrySentOnError {
                        operator_id,
                        error: &error,
                    }
                    .log()
                });
                self.writer.write(cancel, entry).await
            }
            OnError::Drop => {
                self.writer.logger().in_scope(|| {
                    EntryDropped {
                        operator_id,
                        error: &error,
                    }
                    .log()
                });
                Ok(())
            }
        }
    }
}
