// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigErrorKind;

const EXPR_PREFIX: &str = "EXPR(";
const ENV_PREFIX: &str = "env(";

/// A label or resource value: either a literal or `EXPR(env("NAME"))`.
///
/// Rendered once when the operator is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExprStr(String);

impl ExprStr {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn render(&self) -> Result<String, ConfigErrorKind> {
        let Some(body) = self
            .0
            .trim()
            .strip_prefix(EXPR_PREFIX)
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Ok(self.0.clone());
        };

        let variable = body
            .trim()
            .strip_prefix(ENV_PREFIX)
            .and_then(|rest| rest.strip_suffix(')'))
            .map(str::trim)
            .and_then(|arg| arg.strip_prefix('"'))
            .and_then(|arg| arg.strip_suffix('"'))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ConfigErrorKind::InvalidExpression {
                expr: self.0.clone(),
                reason: "only env(\"NAME\") is supported".to_string(),
            })?;

        // unset variables render as empty strings
        Ok(std::env::var(variable).unwrap_or_default())
    }
}

impl From<&str> for ExprStr {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

pub(crate) fn render_all(
    values: &HashMap<String, ExprStr>,
) -> Result<HashMap<String, String>, ConfigErrorKind> {
    values
        .iter()
        .map(|(key, value)| Ok((key.clone(), value.render()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_passes_through() {
        assert_eq!(ExprStr::from("plain").render().unwrap(), "plain");
        assert_eq!(ExprStr::from("EXPR(").render().unwrap(), "EXPR(");
    }

    #[test]
    fn test_env_expression() {
        std::env::set_var("LOGPIPE_EXPR_TEST_HOST", "box-1");
        let value = ExprStr::from("EXPR(env(\"LOGPIPE_EXPR_TEST_HOST\"))");
        assert_eq!(value.render().unwrap(), "box-1");

        let unset = ExprStr::from("EXPR(env(\"LOGPIPE_EXPR_TEST_UNSET\"))");
        assert_eq!(unset.render().unwrap(), "");
    }

    #[test]
    fn test_unsupported_expression() {
        let err = ExprStr::from("EXPR($record.message)").render().unwrap_err();
        assert!(matches!(err, ConfigErrorKind::InvalidExpression { .. }));
    }
}
