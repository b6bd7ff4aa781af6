// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::ConfigError;
use crate::operator::BuildContext;
use crate::traits::Operator;

/// Validated configuration that can be turned into a running operator.
pub trait Builder: Send + Sync {
    fn id(&self) -> &str;

    fn type_name(&self) -> &str;

    /// Validates the configuration and produces a ready operator.
    fn build(&self, context: &BuildContext) -> Result<Arc<dyn Operator>, ConfigError>;
}

impl std::fmt::Debug for dyn Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("id", &self.id())
            .field("type", &self.type_name())
            .finish()
    }
}
