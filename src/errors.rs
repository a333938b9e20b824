// ABOUTME: Unified error handling for the Spark intake backend
// ABOUTME: Defines AppError taxonomy, constructor helpers, and HTTP response mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! Unified error type for the whole crate
//!
//! Every fallible operation returns [`AppResult`]. Variants map 1:1 to the
//! failure classes the system distinguishes: bad input, bad credentials,
//! upstream completion-API failures, transport failures, persistence-API
//! failures, local database failures, and configuration problems.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or missing user input, or a credential that fails sanity checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// The completion backend rejected the credential (HTTP 401)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The completion backend returned a non-success response
    #[error("Completion API error (HTTP {status}): {message}")]
    Api {
        /// Upstream HTTP status code
        status: u16,
        /// Upstream error message, if one could be parsed
        message: String,
    },

    /// Timeout or connection failure talking to a remote service
    #[error("Transport error: {0}")]
    Transport(String),

    /// The profile store API returned a non-success response
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Local database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Invalid or missing input
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Credential rejected by the completion backend
    #[must_use]
    pub fn auth_invalid(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Completion backend failure carrying the upstream status code
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Timeout or connection failure
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Profile store API failure
    #[must_use]
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Local database failure
    #[must_use]
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Missing entity
    #[must_use]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Configuration problem
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Internal invariant violation
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code this error maps to when surfaced through a route
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Transport(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Persistence(_) | Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization failed: {e}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "success": false,
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::invalid_input("empty message");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_preserves_upstream_status() {
        let err = AppError::api(429, "rate limited");
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn unknown_upstream_status_falls_back_to_bad_gateway() {
        let err = AppError::api(0, "bogus");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
