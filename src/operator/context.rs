// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use tracing::Span;

use crate::errors::{ConfigError, ConfigErrorKind};

/// Span-backed logger handed to operators at build time.
///
/// The pipeline owns the root span; every operator gets a child span carrying
/// its `operator_id` and `operator_type`, so events emitted inside it are
/// attributed without repeating those fields.
#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
}

impl Logger {
    pub fn new(pipeline: &str) -> Self {
        Self {
            span: tracing::info_span!("pipeline", pipeline = pipeline),
        }
    }

    /// Child logger for one operator.
    pub fn for_operator(&self, operator_id: &str, operator_type: &str) -> Self {
        Self {
            span: tracing::info_span!(
                parent: &self.span,
                "operator",
                operator_id = operator_id,
                operator_type = operator_type,
            ),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Runs `f` with this logger's span entered.
    pub fn in_scope<F: FnOnce() -> T, T>(&self, f: F) -> T {
        self.span.in_scope(f)
    }
}

/// Collaborators required to build operators.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    logger: Option<Logger>,
    operator_ids: Option<HashSet<String>>,
}

impl BuildContext {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
            operator_ids: None,
        }
    }

    /// Every operator ID in the pipeline being built. When set, configured
    /// outputs are resolved against it during `build`.
    pub fn with_operator_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operator_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn without_logger(mut self) -> Self {
        self.logger = None;
        self
    }

    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    pub fn operator_ids(&self) -> Option<&HashSet<String>> {
        self.operator_ids.as_ref()
    }

    /// The logger, or the `MissingLogger` error for `operator_id`.
    pub fn require_logger(&self, operator_id: &str) -> Result<&Logger, ConfigError> {
        self.logger
            .as_ref()
            .ok_or_else(|| ConfigError::new(operator_id, ConfigErrorKind::MissingLogger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_logger() {
        let context = BuildContext::new(Logger::new("test"));
        assert!(context.require_logger("op").is_ok());

        let err = context.without_logger().require_logger("op").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::MissingLogger);
        assert_eq!(err.operator_id, "op");
        assert!(err.to_string().contains("build context is missing a logger"));
    }

    #[test]
    fn test_operator_ids() {
        let context = BuildContext::new(Logger::new("test"));
        assert!(context.operator_ids().is_none());

        let context = context.with_operator_ids(["a", "b"]);
        let ids = context.operator_ids().unwrap();
        assert!(ids.contains("a") && ids.contains("b"));
    }
}
