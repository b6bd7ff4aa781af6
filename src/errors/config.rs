// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build-time configuration errors.

use std::fmt;

use thiserror::Error;

use super::FieldError;

/// What went wrong while building an operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    #[error("build context is missing a logger")]
    MissingLogger,

    #[error("invalid `on_error` field: '{0}'")]
    InvalidOnError(String),

    #[error("output operator '{0}' does not exist")]
    UnknownOutput(String),

    #[error("output operator '{0}' cannot process entries")]
    OutputCannotProcess(String),

    #[error("operator cannot output")]
    CannotOutput,

    #[error(transparent)]
    InvalidField(#[from] FieldError),

    #[error("missing required field `{0}`")]
    MissingRequiredField(&'static str),

    #[error("invalid 'delimiter': '{0}'")]
    InvalidDelimiter(String),

    #[error("missing field delimiter in header")]
    MissingHeaderDelimiter,

    #[error("invalid expression '{expr}': {reason}")]
    InvalidExpression { expr: String, reason: String },

    #[error("unsupported operator type '{0}'")]
    UnsupportedType(String),

    #[error("invalid operator configuration: {0}")]
    InvalidConfig(String),

    #[error("duplicate operator id '{0}'")]
    DuplicateId(String),

    #[error("operator outputs form a cycle through: {}", .0.join(", "))]
    CyclicOutputs(Vec<String>),
}

/// A configuration error tied to the operator that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub operator_id: String,
    pub kind: ConfigErrorKind,
}

impl ConfigError {
    pub fn new(operator_id: impl Into<String>, kind: ConfigErrorKind) -> Self {
        Self {
            operator_id: operator_id.into(),
            kind,
        }
    }

    /// Remediation advice suitable for showing next to the error.
    pub fn hint(&self) -> &'static str {
        match &self.kind {
            ConfigErrorKind::MissingLogger => {
                "Construct the BuildContext with a Logger before building operators"
            }
            ConfigErrorKind::InvalidOnError(_) => {
                "Set `on_error` to `send` or `drop`, or leave it unset"
            }
            ConfigErrorKind::UnknownOutput(_) => {
                "Ensure every `output` id names an operator in the same pipeline"
            }
            ConfigErrorKind::OutputCannotProcess(_) => {
                "Input operators cannot be used as the output of another operator"
            }
            ConfigErrorKind::CannotOutput => {
                "Output operators terminate a pipeline; remove their `output` setting"
            }
            ConfigErrorKind::InvalidField(_) => {
                "Use `$record.key`, `$.key`, `$labels.key` or `$resource.key` notation"
            }
            ConfigErrorKind::MissingRequiredField(_) => "Add the missing field to the operator",
            ConfigErrorKind::InvalidDelimiter(_) => "Use a single ASCII character as `delimiter`",
            ConfigErrorKind::MissingHeaderDelimiter => {
                "Separate header names with the configured `delimiter`"
            }
            ConfigErrorKind::InvalidExpression { .. } => {
                "Expressions support only EXPR(env(\"NAME\"))"
            }
            ConfigErrorKind::UnsupportedType(_) => {
                "Register a builder for this type before building the pipeline"
            }
            ConfigErrorKind::InvalidConfig(_) => "Check the operator's options against its documentation",
            ConfigErrorKind::DuplicateId(_) => "Give every operator in the pipeline a unique `id`",
            ConfigErrorKind::CyclicOutputs(_) => "Remove the `output` link that loops back upstream",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (operator_id: {})", self.kind, self.operator_id)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ConfigErrorKind::InvalidField(err) => Some(err),
            _ => None,
        }
    }
}
