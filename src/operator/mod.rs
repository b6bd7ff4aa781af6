// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operator building blocks.
//!
//! * [`context`] - the collaborators handed to every `Builder::build`
//! * [`registry`] - type name to builder factory directory
//! * [`helper`] - composable pieces (writer, labeler, identifier) and the three
//!   structural variants built from them
//! * [`builtin`] - the operators registered by [`Registry::with_builtins`]

pub mod builtin;
pub mod context;
pub mod helper;
pub mod registry;

pub use context::{BuildContext, Logger};
pub use registry::{factory, BuilderFactory, Registry};
