// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Composable operator pieces.
//!
//! Concrete operators are assembled by composition rather than inheritance:
//!
//! ```text
//! BasicOperator ── id, type, scoped logger
//! WriterOperator ── BasicOperator + ordered downstream links
//! InputOperator ── WriterOperator + Labeler + Identifier + write_to
//! OutputOperator ── BasicOperator, never links downstream
//! TransformerOperator ── WriterOperator + on_error policy
//! ParserOperator ── TransformerOperator + parse_from / parse_to
//! ```

mod basic;
mod expr;
mod identifier;
mod input;
mod labeler;
mod output;
mod parser;
mod transformer;
mod writer;

use serde::{Deserialize, Deserializer};

pub use basic::{BasicConfig, BasicOperator};
pub use expr::ExprStr;
pub use identifier::{Identifier, IdentifierConfig};
pub use input::{InputConfig, InputOperator};
pub use labeler::{Labeler, LabelerConfig};
pub use output::{OutputConfig, OutputOperator};
pub use parser::{ParserConfig, ParserOperator};
pub use transformer::{OnError, TransformerConfig, TransformerOperator};
pub use writer::{WriterConfig, WriterOperator};

/// Accepts either a single string or a list of strings.
pub(crate) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(id) => vec![id],
        OneOrMany::Many(ids) => ids,
    })
}
