// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline assembly and lifecycle events.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// All operators built and linked.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipelineBuilt {
    pub operator_count: usize,
}

impl Display for PipelineBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline built with {} operators", self.operator_count)
    }
}

impl StructuredLog for PipelineBuilt {
    fn log(&self) {
        tracing::info!(operator_count = self.operator_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("pipeline_build", span_name = name, operator_count = self.operator_count)
    }
}

/// Pipeline construction aborted.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct PipelineBuildFailed<'a> {
    pub operator_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PipelineBuildFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline build failed at operator '{}': {}",
            self.operator_id, self.error
        )
    }
}

impl StructuredLog for PipelineBuildFailed<'_> {
    fn log(&self) {
        tracing::error!(
            operator_id = self.operator_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "pipeline_build",
            span_name = name,
            operator_id = self.operator_id,
            error = %self.error,
        )
    }
}

/// All operators started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipelineStarted {
    pub operator_count: usize,
    pub duration: Duration,
}

impl Display for PipelineStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline started {} operators in {:?}",
            self.operator_count, self.duration
        )
    }
}

impl StructuredLog for PipelineStarted {
    fn log(&self) {
        tracing::info!(
            operator_count = self.operator_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_start",
            span_name = name,
            operator_count = self.operator_count,
        )
    }
}

/// All operators stopped.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipelineStopped {
    pub operator_count: usize,
}

impl Display for PipelineStopped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline stopped {} operators", self.operator_count)
    }
}

impl StructuredLog for PipelineStopped {
    fn log(&self) {
        tracing::info!(operator_count = self.operator_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("pipeline_stop", span_name = name, operator_count = self.operator_count)
    }
}

/// An operator failed to start or stop.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct OperatorLifecycleFailed<'a> {
    pub operator_id: &'a str,
    pub phase: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for OperatorLifecycleFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operator '{}' failed to {}: {}",
            self.operator_id, self.phase, self.error
        )
    }
}

impl StructuredLog for OperatorLifecycleFailed<'_> {
    fn log(&self) {
        tracing::error!(
            operator_id = self.operator_id,
            phase = self.phase,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "operator_lifecycle",
            span_name = name,
            operator_id = self.operator_id,
            phase = self.phase,
        )
    }
}
