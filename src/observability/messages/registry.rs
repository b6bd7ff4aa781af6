// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A registration replaced an existing builder of the same name.
///
/// Last writer wins; this is informational only.
///
/// # Log Level
/// `debug!`
pub struct BuilderOverwritten<'a> {
    pub type_name: &'a str,
    pub namespace: &'a str,
}

impl Display for BuilderOverwritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Builder for '{}' replaced in {} namespace",
            self.type_name, self.namespace
        )
    }
}

impl StructuredLog for BuilderOverwritten<'_> {
    fn log(&self) {
        tracing::debug!(
            type_name = self.type_name,
            namespace = self.namespace,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "registry",
            span_name = name,
            type_name = self.type_name,
            namespace = self.namespace,
        )
    }
}
