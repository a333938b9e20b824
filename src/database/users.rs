// ABOUTME: User record database operations
// ABOUTME: CRUD for profiles plus the wellness-report and check-frequency sub-fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

use super::Database;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// A full stored user record
///
/// Age and check frequency are strings end to end, matching the wire
/// format; numeric interpretation happens in the clients that need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Row identifier
    pub user_id: i64,
    /// Display name
    pub user_name: String,
    /// Age as entered
    pub age: String,
    /// Biological sex label
    pub sex: String,
    /// Height display string
    pub height: String,
    /// Weight display string
    pub weight: String,
    /// Free-text medical background
    pub medical_background: String,
    /// Free-text chronic conditions
    pub chronic_conditions: String,
    /// Free-text current medications
    pub current_medications: String,
    /// Free-text hereditary risk patterns
    pub hereditary_risk_patterns: String,
    /// Recommended days between checks, as a string (may be empty)
    pub wellness_check_frequency: String,
    /// Latest synthesized wellness report (may be empty)
    pub wellness_report: String,
}

/// Trimmed record returned by the list endpoint for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Row identifier
    pub user_id: i64,
    /// Display name
    pub user_name: String,
    /// Age as entered
    pub age: String,
    /// Biological sex label
    pub sex: String,
    /// Recommended days between checks, as a string (may be empty)
    pub wellness_check_frequency: String,
    /// Latest synthesized wellness report (may be empty)
    pub wellness_report: String,
}

/// Payload for creating a user record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Display name
    pub user_name: String,
    /// Age as entered
    #[serde(default)]
    pub age: String,
    /// Biological sex label
    #[serde(default)]
    pub sex: String,
    /// Height display string
    #[serde(default)]
    pub height: String,
    /// Weight display string
    #[serde(default)]
    pub weight: String,
    /// Free-text medical background
    #[serde(default)]
    pub medical_background: String,
    /// Free-text chronic conditions
    #[serde(default)]
    pub chronic_conditions: String,
    /// Free-text current medications
    #[serde(default)]
    pub current_medications: String,
    /// Free-text hereditary risk patterns
    #[serde(default)]
    pub hereditary_risk_patterns: String,
    /// Recommended days between checks, as a string
    #[serde(default)]
    pub wellness_check_frequency: String,
    /// Wellness report text
    #[serde(default)]
    pub wellness_report: String,
}

/// Payload for the full-field profile update
///
/// Deliberately excludes the wellness report and check frequency; those are
/// written only through their own operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    /// Display name
    pub user_name: String,
    /// Age as entered
    #[serde(default)]
    pub age: String,
    /// Biological sex label
    #[serde(default)]
    pub sex: String,
    /// Height display string
    #[serde(default)]
    pub height: String,
    /// Weight display string
    #[serde(default)]
    pub weight: String,
    /// Free-text medical background
    #[serde(default)]
    pub medical_background: String,
    /// Free-text chronic conditions
    #[serde(default)]
    pub chronic_conditions: String,
    /// Free-text current medications
    #[serde(default)]
    pub current_medications: String,
    /// Free-text hereditary risk patterns
    #[serde(default)]
    pub hereditary_risk_patterns: String,
}

impl Database {
    /// Insert a new user record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_user(&self, user: &NewUser) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO users (
                user_name, age, sex, height, weight,
                medical_background, chronic_conditions, current_medications,
                hereditary_risk_patterns, wellness_check_frequency, wellness_report
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(&user.user_name)
        .bind(&user.age)
        .bind(&user.sex)
        .bind(&user.height)
        .bind(&user.weight)
        .bind(&user.medical_background)
        .bind(&user.chronic_conditions)
        .bind(&user.current_medications)
        .bind(&user.hereditary_risk_patterns)
        .bind(&user.wellness_check_frequency)
        .bind(&user.wellness_report)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch a full user record by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_user(&self, user_id: i64) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.as_ref().map(row_to_record).transpose()
    }

    /// List all users with the trimmed dashboard field set, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, user_name, age, sex, wellness_check_frequency, wellness_report
            FROM users
            ORDER BY user_id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

        rows.iter().map(row_to_summary).collect()
    }

    /// Overwrite the profile fields of a user record
    ///
    /// Leaves the wellness report and check frequency untouched. Returns
    /// `false` when no row matched the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_user(&self, user_id: i64, user: &UserUpdate) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users SET
                user_name = $2,
                age = $3,
                sex = $4,
                height = $5,
                weight = $6,
                medical_background = $7,
                chronic_conditions = $8,
                current_medications = $9,
                hereditary_risk_patterns = $10
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .bind(&user.user_name)
        .bind(&user.age)
        .bind(&user.sex)
        .bind(&user.height)
        .bind(&user.weight)
        .bind(&user.medical_background)
        .bind(&user.chronic_conditions)
        .bind(&user.current_medications)
        .bind(&user.hereditary_risk_patterns)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace a user's wellness report
    ///
    /// Returns `false` when no row matched the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_wellness_report(&self, user_id: i64, report: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET wellness_report = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(report)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update wellness report: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace a user's check frequency
    ///
    /// Returns `false` when no row matched the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_wellness_frequency(&self, user_id: i64, frequency: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET wellness_check_frequency = $2 WHERE user_id = $1")
                .bind(user_id)
                .bind(frequency)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to update wellness frequency: {e}"))
                })?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_record(row: &SqliteRow) -> AppResult<UserRecord> {
    Ok(UserRecord {
        user_id: get_column(row, "user_id")?,
        user_name: get_column(row, "user_name")?,
        age: get_column(row, "age")?,
        sex: get_column(row, "sex")?,
        height: get_column(row, "height")?,
        weight: get_column(row, "weight")?,
        medical_background: get_column(row, "medical_background")?,
        chronic_conditions: get_column(row, "chronic_conditions")?,
        current_medications: get_column(row, "current_medications")?,
        hereditary_risk_patterns: get_column(row, "hereditary_risk_patterns")?,
        wellness_check_frequency: get_column(row, "wellness_check_frequency")?,
        wellness_report: get_column(row, "wellness_report")?,
    })
}

fn row_to_summary(row: &SqliteRow) -> AppResult<UserSummary> {
    Ok(UserSummary {
        user_id: get_column(row, "user_id")?,
        user_name: get_column(row, "user_name")?,
        age: get_column(row, "age")?,
        sex: get_column(row, "sex")?,
        wellness_check_frequency: get_column(row, "wellness_check_frequency")?,
        wellness_report: get_column(row, "wellness_report")?,
    })
}

fn get_column<'r, T>(row: &'r SqliteRow, column: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| AppError::database(format!("Failed to read column {column}: {e}")))
}
