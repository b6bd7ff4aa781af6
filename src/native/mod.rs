// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Buffers for native calls that write into caller-supplied memory.
//!
//! Such calls report "too small" together with the size they need. The
//! protocol is: offer the whole buffer, grow it to the reported size once, and
//! retry exactly once more. Decoding then covers exactly the bytes the call
//! said it wrote.

mod buffer;

pub use buffer::{decode_utf16, Buffer, DEFAULT_BUFFER_SIZE};

use crate::errors::ProcessingError;
use crate::observability::messages::{native::BufferResized, StructuredLog};

/// Outcome reported by a native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeCallStatus {
    Success { written: usize },
    InsufficientBuffer { required: usize },
}

/// Runs `call` against `buffer`, growing the buffer and retrying once if the
/// call reports it too small. Returns the number of bytes written.
pub fn call_with_buffer<F>(buffer: &mut Buffer, mut call: F) -> Result<usize, ProcessingError>
where
    F: FnMut(&mut [u8]) -> Result<NativeCallStatus, ProcessingError>,
{
    let required = match call(buffer.as_mut_slice())? {
        NativeCallStatus::Success { written } => return Ok(written),
        NativeCallStatus::InsufficientBuffer { required } => required,
    };

    BufferResized {
        previous: buffer.size(),
        required,
    }
    .log();
    buffer.update_size(required);

    match call(buffer.as_mut_slice())? {
        NativeCallStatus::Success { written } => Ok(written),
        NativeCallStatus::InsufficientBuffer { required } => Err(ProcessingError::NativeCall(
            format!(
                "buffer of {} bytes still too small after resize, {} required",
                buffer.size(),
                required
            ),
        )),
    }
}

/// One native call site and the buffer it reuses across calls.
#[derive(Debug, Default)]
pub struct CallSite {
    buffer: Buffer,
}

impl CallSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Calls out and decodes the written UTF-16 text, without trailing NULs.
    pub fn render<F>(&mut self, call: F) -> Result<String, ProcessingError>
    where
        F: FnMut(&mut [u8]) -> Result<NativeCallStatus, ProcessingError>,
    {
        let written = call_with_buffer(&mut self.buffer, call)?;
        let text = self.buffer.read_string(written)?;
        Ok(text.trim_end_matches('\0').to_string())
    }
}
