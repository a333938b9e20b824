// ABOUTME: Route module organization for the persistence HTTP server
// ABOUTME: Assembles the user CRUD and health routes into one router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! HTTP routes for the persistence backend
//!
//! Each domain module exposes a `routes` constructor; this module merges
//! them and applies the shared middleware stack.

/// Health check route
pub mod health;
/// User CRUD and derived-field routes
pub mod users;

use crate::database::Database;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Assemble the full application router
#[must_use]
pub fn router(database: Database) -> Router {
    Router::new()
        .merge(health::HealthRoutes::routes())
        .merge(users::UserRoutes::routes(database))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
