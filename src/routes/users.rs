// ABOUTME: User CRUD route handlers for the persistence HTTP server
// ABOUTME: Exposes create/fetch/list/update plus the report and frequency sub-resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! User persistence endpoints
//!
//! Every response carries a `success` boolean; failures additionally carry
//! an `error` string via the shared error responder. The wellness report
//! and check frequency are writable only through their sub-resource routes,
//! never through the full-field update.

use crate::database::{Database, NewUser, UserRecord, UserSummary, UserUpdate};
use crate::errors::AppError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// User CRUD routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    #[must_use]
    pub fn routes(database: Database) -> Router {
        Router::new()
            .route(
                "/api/users",
                get(Self::handle_list_users).post(Self::handle_create_user),
            )
            .route(
                "/api/users/:id",
                get(Self::handle_get_user).put(Self::handle_update_user),
            )
            .route(
                "/api/users/:id/wellness-report",
                put(Self::handle_update_report),
            )
            .route(
                "/api/users/:id/wellness-frequency",
                put(Self::handle_update_frequency),
            )
            .with_state(database)
    }

    async fn handle_create_user(
        State(database): State<Database>,
        Json(payload): Json<NewUser>,
    ) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
        if payload.user_name.trim().is_empty() {
            return Err(AppError::invalid_input("userName is required"));
        }
        let user_id = database.create_user(&payload).await?;
        Ok((
            StatusCode::CREATED,
            Json(CreatedResponse {
                success: true,
                user_id,
            }),
        ))
    }

    async fn handle_get_user(
        State(database): State<Database>,
        Path(id): Path<i64>,
    ) -> Result<Json<UserResponse>, AppError> {
        let user = database
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        Ok(Json(UserResponse {
            success: true,
            user,
        }))
    }

    async fn handle_list_users(
        State(database): State<Database>,
    ) -> Result<Json<UserListResponse>, AppError> {
        let users = database.list_users().await?;
        Ok(Json(UserListResponse {
            success: true,
            users,
        }))
    }

    async fn handle_update_user(
        State(database): State<Database>,
        Path(id): Path<i64>,
        Json(payload): Json<UserUpdate>,
    ) -> Result<Json<UpdatedResponse>, AppError> {
        if !database.update_user(id, &payload).await? {
            return Err(AppError::not_found("User not found"));
        }
        Ok(Json(UpdatedResponse { success: true }))
    }

    async fn handle_update_report(
        State(database): State<Database>,
        Path(id): Path<i64>,
        Json(payload): Json<ReportUpdate>,
    ) -> Result<Json<UpdatedResponse>, AppError> {
        if !database
            .update_wellness_report(id, &payload.wellness_report)
            .await?
        {
            return Err(AppError::not_found("User not found"));
        }
        Ok(Json(UpdatedResponse { success: true }))
    }

    async fn handle_update_frequency(
        State(database): State<Database>,
        Path(id): Path<i64>,
        Json(payload): Json<FrequencyUpdate>,
    ) -> Result<Json<UpdatedResponse>, AppError> {
        if !database
            .update_wellness_frequency(id, &payload.wellness_check_frequency)
            .await?
        {
            return Err(AppError::not_found("User not found"));
        }
        Ok(Json(UpdatedResponse { success: true }))
    }
}

/// Body for the wellness-report sub-resource update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportUpdate {
    wellness_report: String,
}

/// Body for the check-frequency sub-resource update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrequencyUpdate {
    wellness_check_frequency: String,
}

/// Response for user creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedResponse {
    success: bool,
    user_id: i64,
}

/// Response for a single-user fetch
#[derive(Debug, Serialize)]
struct UserResponse {
    success: bool,
    user: UserRecord,
}

/// Response for the user list
#[derive(Debug, Serialize)]
struct UserListResponse {
    success: bool,
    users: Vec<UserSummary>,
}

/// Response for the update operations
#[derive(Debug, Serialize)]
struct UpdatedResponse {
    success: bool,
}
