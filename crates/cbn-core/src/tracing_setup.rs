//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::defaults::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Reads the `CBN_LOG` environment variable for per-module levels,
/// e.g. `CBN_LOG=cbn_engine=debug`. Falls back to `cbn=info`.
///
/// Idempotent: later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(env_filter())
            .init();
    });
}

/// Like [`init_tracing`], but each event is written as one JSON object.
pub fn init_json_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .init();
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
