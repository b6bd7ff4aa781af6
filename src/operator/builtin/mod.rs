// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operators shipped with the engine.

pub mod input;
pub mod output;
pub mod parser;
pub mod transformer;

use crate::operator::registry::{factory, Registry};

/// Registers every builtin operator type under its type name.
pub fn register_all(registry: &mut Registry) {
    registry.register(transformer::noop::TYPE_NAME, factory::<transformer::noop::NoopConfig>());
    registry.register(parser::csv::TYPE_NAME, factory::<parser::csv::CsvParserConfig>());
    registry.register(parser::json::TYPE_NAME, factory::<parser::json::JsonParserConfig>());
    registry.register(
        input::generate::TYPE_NAME,
        factory::<input::generate::GenerateInputConfig>(),
    );
    registry.register(output::drop::TYPE_NAME, factory::<output::drop::DropOutputConfig>());
    registry.register(output::stdout::TYPE_NAME, factory::<output::stdout::StdoutConfig>());
}
