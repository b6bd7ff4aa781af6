// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `operator` - operator build and per-entry disposition events
//! * `pipeline` - pipeline assembly and lifecycle events
//! * `registry` - builder registration events
//! * `native` - native call buffer management
//!
//! # Usage Pattern
//!
//! ```rust
//! use logpipe::observability::messages::{pipeline::PipelineBuilt, StructuredLog};
//!
//! let msg = PipelineBuilt { operator_count: 3 };
//! msg.log();
//! ```

use tracing::Span;

pub mod native;
pub mod operator;
pub mod pipeline;
pub mod registry;

/// A message that knows its log level and structured fields.
pub trait StructuredLog {
    /// Emits the message as a `tracing` event.
    fn log(&self);

    /// Builds a span carrying the same fields.
    fn span(&self, name: &str) -> Span;
}
