// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::expr::{render_all, ExprStr};
use crate::entry::Entry;
use crate::errors::ConfigErrorKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelerConfig {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, ExprStr>,
}

impl LabelerConfig {
    pub fn build(&self) -> Result<Labeler, ConfigErrorKind> {
        Ok(Labeler {
            labels: render_all(&self.labels)?,
        })
    }
}

/// Stamps a fixed set of labels onto entries.
#[derive(Debug, Clone, Default)]
pub struct Labeler {
    labels: HashMap<String, String>,
}

impl Labeler {
    /// Applies every configured label, overwriting existing keys.
    pub fn label(&self, entry: &mut Entry) {
        for (key, value) in &self.labels {
            entry.add_label(key.clone(), value.clone());
        }
    }
}
