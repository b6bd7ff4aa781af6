// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::expr::{render_all, ExprStr};
use crate::entry::Entry;
use crate::errors::ConfigErrorKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierConfig {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub resource: HashMap<String, ExprStr>,
}

impl IdentifierConfig {
    pub fn build(&self) -> Result<Identifier, ConfigErrorKind> {
        Ok(Identifier {
            resource: render_all(&self.resource)?,
        })
    }
}

/// Stamps a fixed set of resource keys onto entries.
#[derive(Debug, Clone, Default)]
pub struct Identifier {
    resource: HashMap<String, String>,
}

impl Identifier {
    pub fn identify(&self, entry: &mut Entry) {
        for (key, value) in &self.resource {
            entry.add_resource_key(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify() {
        let config = IdentifierConfig {
            resource: HashMap::from([("host".to_string(), ExprStr::from("web-1"))]),
        };
        let identifier = config.build().unwrap();

        let mut entry = Entry::new();
        entry.add_resource_key("host", "stale");
        identifier.identify(&mut entry);

        assert_eq!(entry.resource["host"], "web-1");
        assert!(entry.labels.is_empty());
    }

    #[test]
    fn test_invalid_expression_fails_build() {
        let config = IdentifierConfig {
            resource: HashMap::from([("host".to_string(), ExprStr::from("EXPR(hostname())"))]),
        };
        assert!(config.build().is_err());
    }
}
