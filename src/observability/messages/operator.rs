// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for operator build and entry disposition events.

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// Operator finished building.
///
/// # Log Level
/// `debug!` - Routine lifecycle detail
pub struct OperatorBuilt<'a> {
    pub operator_id: &'a str,
    pub operator_type: &'a str,
}

impl Display for OperatorBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operator '{}' of type '{}' built",
            self.operator_id, self.operator_type
        )
    }
}

impl StructuredLog for OperatorBuilt<'_> {
    fn log(&self) {
        tracing::debug!(
            operator_id = self.operator_id,
            operator_type = self.operator_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "operator_build",
            span_name = name,
            operator_id = self.operator_id,
            operator_type = self.operator_type,
        )
    }
}

/// An input operator was handed an entry it cannot process.
///
/// # Log Level
/// `error!` - Misconfigured pipeline
pub struct InputReceivedEntry<'a> {
    pub operator_id: &'a str,
}

impl Display for InputReceivedEntry<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operator '{}' received an entry, but can not process",
            self.operator_id
        )
    }
}

impl StructuredLog for InputReceivedEntry<'_> {
    fn log(&self) {
        tracing::error!(operator_id = self.operator_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("input_misuse", span_name = name, operator_id = self.operator_id)
    }
}

/// A transform failed and the entry was discarded (`on_error: drop`).
///
/// # Log Level
/// `warn!` - Data loss by policy
pub struct EntryDropped<'a> {
    pub operator_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EntryDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operator '{}' dropped entry after failure: {}",
            self.operator_id, self.error
        )
    }
}

impl StructuredLog for EntryDropped<'_> {
    fn log(&self) {
        tracing::warn!(
            operator_id = self.operator_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "entry_dropped",
            span_name = name,
            operator_id = self.operator_id,
            error = %self.error,
        )
    }
}

/// A transform failed and the unmodified entry was forwarded (`on_error: send`).
///
/// # Log Level
/// `warn!` - Partially processed entry reaches sinks
pub struct EntrySentOnError<'a> {
    pub operator_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EntrySentOnError<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operator '{}' forwarding unmodified entry after failure: {}",
            self.operator_id, self.error
        )
    }
}

impl StructuredLog for EntrySentOnError<'_> {
    fn log(&self) {
        tracing::warn!(
            operator_id = self.operator_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "entry_sent_on_error",
            span_name = name,
            operator_id = self.operator_id,
            error = %self.error,
        )
    }
}

/// A transform failed and the error is returned to the caller (no `on_error`).
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct EntryFailed<'a> {
    pub operator_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EntryFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operator '{}' failed to process entry: {}",
            self.operator_id, self.error
        )
    }
}

impl StructuredLog for EntryFailed<'_> {
    fn log(&self) {
        tracing::error!(
            operator_id = self.operator_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "entry_failed",
            span_name = name,
            operator_id = self.operator_id,
            error = %self.error,
        )
    }
}
