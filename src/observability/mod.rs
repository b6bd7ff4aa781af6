// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types live in [`messages`] and follow a struct-based pattern with a
//! `Display` implementation plus [`messages::StructuredLog`], so log text is not
//! scattered through operator code and every event carries structured fields.
//!
//! The engine never installs a subscriber on its own. Embedders either bring their
//! own or call [`init_tracing`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod messages;

/// The fmt subscriber used by [`init_tracing`], filtered by `RUST_LOG` and
/// falling back to `default_filter` when the variable is unset or invalid.
pub fn subscriber(default_filter: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
}

/// Installs [`subscriber`] as the global default.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    subscriber(default_filter).try_init()
}
