// ABOUTME: HTTP client for the remote profile persistence API
// ABOUTME: Implements ProfileStore over reqwest with typed per-endpoint envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

use crate::errors::{AppError, AppResult};
use crate::models::{CheckInterval, ProfileSnapshot, UserProfile};
use crate::store::ProfileStore;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Fixed request timeout for store calls, matching the completion client
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Days returned when the stored interval is absent or unparseable
const DEFAULT_INTERVAL_DAYS: u32 = 30;

// ============================================================================
// Wire Types
// ============================================================================

/// Full-field payload for create; age and frequency are string-typed on the wire
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserPayload<'a> {
    user_name: &'a str,
    age: String,
    height: &'a str,
    weight: &'a str,
    sex: &'a str,
    medical_background: &'a str,
    chronic_conditions: &'a str,
    current_medications: &'a str,
    hereditary_risk_patterns: &'a str,
    wellness_check_frequency: &'a str,
    wellness_report: &'a str,
}

/// Update payload: the nine profile fields only, no report or frequency
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateUserPayload<'a> {
    user_name: &'a str,
    age: String,
    height: &'a str,
    weight: &'a str,
    sex: &'a str,
    medical_background: &'a str,
    chronic_conditions: &'a str,
    current_medications: &'a str,
    hereditary_risk_patterns: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateReportPayload<'a> {
    wellness_report: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFrequencyPayload {
    wellness_check_frequency: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserEnvelope {
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct FetchUserEnvelope {
    user: StoredUser,
}

/// The stored record's field set; absent fields become empty strings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    #[serde(default)]
    age: String,
    #[serde(default)]
    sex: String,
    #[serde(default)]
    height: String,
    #[serde(default)]
    weight: String,
    #[serde(default)]
    medical_background: String,
    #[serde(default)]
    chronic_conditions: String,
    #[serde(default)]
    current_medications: String,
    #[serde(default)]
    hereditary_risk_patterns: String,
    #[serde(default)]
    wellness_check_frequency: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: String,
}

// ============================================================================
// Client
// ============================================================================

/// HTTP bridge to the remote persistence API
pub struct HttpProfileStore {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpProfileStore {
    /// Create a new store client against `base_url` (e.g. `http://127.0.0.1:3000/api`)
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            http_client,
        })
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    /// Map a non-success response to a persistence error carrying the
    /// body's `error` string when one is present
    async fn persistence_error(response: Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .filter(|e| !e.error.is_empty())
            .map_or(body, |e| e.error);
        AppError::persistence(format!("HTTP {status}: {message}"))
    }

    /// Accept 2xx plus 204 for update-shaped requests
    fn is_update_success(status: StatusCode) -> bool {
        status.is_success() || status == StatusCode::NO_CONTENT
    }

    async fn send_update<T: Serialize + Sync>(&self, url: &str, payload: &T) -> AppResult<()> {
        let response = self
            .http_client
            .put(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("Store request failed: {e}")))?;

        if !Self::is_update_success(response.status()) {
            return Err(Self::persistence_error(response).await);
        }
        Ok(())
    }

    async fn fetch_stored_user(&self, id: i64) -> AppResult<StoredUser> {
        let response = self
            .http_client
            .get(self.user_url(id))
            .send()
            .await
            .map_err(|e| AppError::transport(format!("Store request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::persistence_error(response).await);
        }

        let envelope: FetchUserEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::persistence(format!("Failed to parse user record: {e}")))?;
        Ok(envelope.user)
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn create(&self, profile: &UserProfile) -> AppResult<i64> {
        let payload = CreateUserPayload {
            user_name: &profile.name,
            age: profile.age.to_string(),
            height: &profile.height,
            weight: &profile.weight,
            sex: &profile.sex,
            medical_background: &profile.medical_background,
            chronic_conditions: &profile.chronic_conditions,
            current_medications: &profile.current_medications,
            hereditary_risk_patterns: &profile.hereditary_risk_patterns,
            wellness_check_frequency: "",
            wellness_report: "",
        };

        let response = self
            .http_client
            .post(format!("{}/users", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("Store request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::persistence_error(response).await);
        }

        let envelope: CreateUserEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::persistence(format!("Failed to parse create response: {e}")))?;

        info!(user_id = envelope.user_id, "created remote profile");
        Ok(envelope.user_id)
    }

    async fn update(&self, id: i64, profile: &UserProfile) -> AppResult<()> {
        let payload = UpdateUserPayload {
            user_name: &profile.name,
            age: profile.age.to_string(),
            height: &profile.height,
            weight: &profile.weight,
            sex: &profile.sex,
            medical_background: &profile.medical_background,
            chronic_conditions: &profile.chronic_conditions,
            current_medications: &profile.current_medications,
            hereditary_risk_patterns: &profile.hereditary_risk_patterns,
        };
        self.send_update(&self.user_url(id), &payload).await
    }

    async fn update_report(&self, id: i64, report: &str) -> AppResult<()> {
        let payload = UpdateReportPayload {
            wellness_report: report,
        };
        let url = format!("{}/wellness-report", self.user_url(id));
        self.send_update(&url, &payload).await
    }

    async fn update_interval(&self, id: i64, interval: CheckInterval) -> AppResult<()> {
        let payload = UpdateFrequencyPayload {
            wellness_check_frequency: interval.days().to_string(),
        };
        let url = format!("{}/wellness-frequency", self.user_url(id));
        self.send_update(&url, &payload).await
    }

    async fn fetch(&self, id: i64) -> AppResult<ProfileSnapshot> {
        let user = self.fetch_stored_user(id).await?;
        Ok(ProfileSnapshot {
            age: user.age,
            sex: user.sex,
            height: user.height,
            weight: user.weight,
            medical_background: user.medical_background,
            chronic_conditions: user.chronic_conditions,
            current_medications: user.current_medications,
            hereditary_risk_patterns: user.hereditary_risk_patterns,
        })
    }

    async fn fetch_interval(&self, id: i64) -> AppResult<u32> {
        let user = self.fetch_stored_user(id).await?;
        Ok(interval_or_default(&user.wellness_check_frequency))
    }
}

/// Parse a stored frequency string, falling back to the monthly default
/// when it is empty, non-numeric, or zero
fn interval_or_default(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_INTERVAL_DAYS)
}
