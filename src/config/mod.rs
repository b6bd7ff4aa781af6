// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline configuration.
//!
//! A pipeline is a list of operator configurations. Each one names its `type`,
//! which selects the registered builder, and carries that builder's options:
//!
//! ```yaml
//! pipeline:
//!   - id: generator
//!     type: generate_input
//!     record: '{"message": "hello"}'
//!     count: 10
//!     output: parser
//!   - id: parser
//!     type: json_parser
//!     output: [sink]
//!   - id: sink
//!     type: stdout
//! ```

mod loader;

pub use loader::{load_config, OperatorConfig, PipelineConfig};
