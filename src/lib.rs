// ABOUTME: Main library entry point for the Spark health-intake platform
// ABOUTME: Provides the intake conversation protocol, LLM and store clients, and the persistence backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

#![deny(unsafe_code)]

//! # Spark Intake
//!
//! A health-intake platform built around a bounded multi-turn wellness-check
//! interview. A session starts from a fixed welcome message, runs through at
//! most four AI follow-up questions, and ends on a canonical completion
//! phrase, after which a clinical-style summary report is synthesized and
//! persisted.
//!
//! ## Architecture
//!
//! - **Intake**: the turn-budgeted conversation protocol (session state
//!   machine and controller)
//! - **LLM**: completion-backend abstraction with an `OpenAI`-compatible
//!   client and the interview/summary/frequency prompts
//! - **Store**: profile-store abstraction with an HTTP client for the
//!   persistence API and a device-local profile cache
//! - **Database / Routes**: the `SQLite`-backed persistence HTTP server the
//!   store client talks to
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use spark_intake::config::ServerConfig;
//! use spark_intake::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Spark persistence server configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-based configuration
pub mod config;
/// `SQLite` database management for the persistence backend
pub mod database;
/// Application-wide error types
pub mod errors;
/// The bounded intake conversation protocol
pub mod intake;
/// Completion backend abstraction and `OpenAI` client
pub mod llm;
/// Structured logging initialization
pub mod logging;
/// Shared data models
pub mod models;
/// HTTP routes for the persistence backend
pub mod routes;
/// Profile store abstraction and clients
pub mod store;
