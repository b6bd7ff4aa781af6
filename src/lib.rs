// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // pipeline + operator configuration
pub mod entry;      // log entries and field addressing
pub mod errors;     // error handling
pub mod native;     // growable buffers for size-constrained native calls
pub mod observability;
pub mod operator;   // helpers, registry, builtin operators
pub mod pipeline;   // operator graph assembly and lifecycle
pub mod traits;     // unified abstractions
pub mod version;

#[cfg(test)]
pub(crate) mod testutil;

pub use crate::config::{load_config, OperatorConfig, PipelineConfig};
pub use entry::{Entry, Field};
pub use operator::{BuildContext, Logger, Registry};
pub use pipeline::Pipeline;
pub use traits::{Builder, Operator, OperatorKind};
