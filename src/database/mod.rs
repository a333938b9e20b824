// ABOUTME: SQLite database management for the persistence backend
// ABOUTME: Owns the connection pool and the schema migration for the users table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

/// User record storage and retrieval
pub mod users;

pub use users::{NewUser, UserRecord, UserSummary, UserUpdate};

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePool;
use tracing::info;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Create the schema if it does not exist
    ///
    /// Age and check frequency are stored as TEXT to match the wire format,
    /// which is string-typed for both.
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_name TEXT NOT NULL,
                age TEXT NOT NULL DEFAULT '',
                sex TEXT NOT NULL DEFAULT '',
                height TEXT NOT NULL DEFAULT '',
                weight TEXT NOT NULL DEFAULT '',
                medical_background TEXT NOT NULL DEFAULT '',
                chronic_conditions TEXT NOT NULL DEFAULT '',
                current_medications TEXT NOT NULL DEFAULT '',
                hereditary_risk_patterns TEXT NOT NULL DEFAULT '',
                wellness_check_frequency TEXT NOT NULL DEFAULT '',
                wellness_report TEXT NOT NULL DEFAULT ''
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        info!("database schema ready");
        Ok(())
    }

    /// Access the underlying pool (used by tests)
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
