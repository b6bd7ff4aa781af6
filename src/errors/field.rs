// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while parsing or writing entry fields.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field expression could not be parsed.
    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// A path segment was applied to a value that cannot be indexed.
    #[error("type mismatch at '{field}': segment '{segment}' cannot index into a {found} value")]
    TypeMismatch {
        field: String,
        segment: String,
        found: &'static str,
    },

    /// Labels and resource keys only hold strings.
    #[error("cannot set '{field}' to a non-string value")]
    NonStringValue { field: String },
}

impl FieldError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FieldError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
