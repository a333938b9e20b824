// ABOUTME: Health check route for the persistence HTTP server
// ABOUTME: Reports service liveness for dashboards and deployment probes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Health check routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health routes
    #[must_use]
    pub fn routes() -> Router {
        Router::new().route("/health", get(Self::handle_health))
    }

    #[allow(clippy::unused_async)]
    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "spark-intake",
        }))
    }
}
