// ABOUTME: Structured logging initialization for the Spark intake backend
// ABOUTME: Configures tracing-subscriber with env-filter and fmt output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! Production logging setup
//!
//! Respects `RUST_LOG`; defaults to `info` for this crate and `warn` for
//! dependencies. Safe to call once at process start.

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Subsequent calls are no-ops (the second `init` would panic, so this
/// uses `try_init` and discards the error).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,spark_intake=info,spark_server=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
