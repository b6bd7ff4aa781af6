// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A native call asked for a bigger buffer.
///
/// # Log Level
/// `debug!` - Expected on first use of large payloads
pub struct BufferResized {
    pub previous: usize,
    pub required: usize,
}

impl Display for BufferResized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Native call buffer resized from {} to {} bytes",
            self.previous, self.required
        )
    }
}

impl StructuredLog for BufferResized {
    fn log(&self) {
        tracing::debug!(previous = self.previous, required = self.required, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "native_buffer",
            span_name = name,
            previous = self.previous,
            required = self.required,
        )
    }
}
