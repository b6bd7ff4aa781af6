// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Malformed text returned by a native call.
///
/// Decode failures are never folded into an `on_error` policy; callers always
/// see them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// UTF-16 input must contain whole code units.
    #[error("utf-16 input has odd byte length {0}")]
    OddLength(usize),

    /// A surrogate was not followed (or preceded) by its pair.
    #[error("unpaired utf-16 surrogate 0x{0:04x}")]
    UnpairedSurrogate(u16),

    /// The requested byte count runs past the end of the buffer.
    #[error("offset {offset} exceeds buffer capacity {capacity}")]
    OutOfBounds { offset: usize, capacity: usize },
}
