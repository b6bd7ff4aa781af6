// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod decode;
mod field;
mod load;
mod processing;

pub use config::{ConfigError, ConfigErrorKind};
pub use decode::DecodeError;
pub use field::FieldError;
pub use load::LoadError;
pub use processing::ProcessingError;
