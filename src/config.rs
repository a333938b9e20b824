// ABOUTME: Environment-only configuration for the Spark intake backend
// ABOUTME: Loads server, database, completion-backend, and store settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! Environment-only configuration
//!
//! Every setting comes from an environment variable with a sensible default;
//! there are no config files. `OPENAI_API_KEY` is the only variable without
//! a default, and it is validated lazily by the intake controller rather
//! than at load time, so the persistence server can run without it.

use crate::errors::{AppError, AppResult};
use std::env;
use std::time::Duration;

/// Default port for the persistence HTTP server
const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default `SQLite` database URL
const DEFAULT_DATABASE_URL: &str = "sqlite:spark.db";

/// Default completion endpoint (`OpenAI`-compatible)
const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default completion model
const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";

/// Default profile store base URL (the local persistence server)
const DEFAULT_STORE_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// Fixed request timeout for both remote clients, in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the persistence HTTP server listens on (`SPARK_HTTP_PORT`)
    pub http_port: u16,
    /// Database URL (`SPARK_DATABASE_URL`)
    pub database_url: String,
    /// Completion backend settings
    pub completion: CompletionConfig,
    /// Profile store base URL (`SPARK_STORE_BASE_URL`)
    pub store_base_url: String,
}

/// Completion backend settings
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Bearer credential (`OPENAI_API_KEY`), trimmed of surrounding whitespace
    pub api_key: String,
    /// Endpoint URL (`OPENAI_BASE_URL`)
    pub endpoint: String,
    /// Model identifier (`SPARK_COMPLETION_MODEL`)
    pub model: String,
    /// Request timeout applied to every call
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_COMPLETION_URL.to_owned(),
            model: DEFAULT_COMPLETION_MODEL.to_owned(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error if `SPARK_HTTP_PORT` is set but not a valid
    /// port number.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("SPARK_HTTP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid SPARK_HTTP_PORT '{raw}': {e}")))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("SPARK_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let completion = CompletionConfig {
            api_key: env::var("OPENAI_API_KEY")
                .map(|k| k.trim().to_owned())
                .unwrap_or_default(),
            endpoint: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_owned()),
            model: env::var("SPARK_COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_owned()),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        };

        let store_base_url =
            env::var("SPARK_STORE_BASE_URL").unwrap_or_else(|_| DEFAULT_STORE_BASE_URL.to_owned());

        Ok(Self {
            http_port,
            database_url,
            completion,
            store_base_url,
        })
    }
}
