// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while an operator processes an entry.

use thiserror::Error;

use super::{DecodeError, FieldError};

#[derive(Error, Debug)]
pub enum ProcessingError {
    /// Input operators originate entries and never receive them.
    #[error("operator cannot process incoming entries")]
    CannotProcess,

    #[error("entry is missing the expected parse_from field '{0}'")]
    MissingField(String),

    #[error(transparent)]
    Field(#[from] FieldError),

    /// A format-specific transform rejected its input.
    #[error("parse failed: {0}")]
    Parse(String),

    #[error("type '{found}' cannot be parsed as {format}")]
    UnsupportedValue {
        found: &'static str,
        format: &'static str,
    },

    /// The native API reported a failure other than an undersized buffer.
    #[error("native call failed: {0}")]
    NativeCall(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A sink failed to emit the entry.
    #[error("output failed: {0}")]
    Output(String),

    /// A downstream operator was released by its pipeline.
    #[error("downstream operator '{0}' is no longer available")]
    OutputGone(String),

    /// A background task owned by the operator panicked or was aborted.
    #[error("background task failed: {0}")]
    Task(String),

    #[error("processing cancelled")]
    Cancelled,
}
