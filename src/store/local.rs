// ABOUTME: Device-local profile blob storage
// ABOUTME: Persists one serialized UserProfile under a fixed file name, local-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Directory under the platform data dir that holds the blob
const APP_DIR: &str = "spark-intake";

/// Fixed file name for the single profile blob
const PROFILE_FILE: &str = "profile.json";

/// Single-profile local cache
///
/// The local copy is authoritative for the caller: remote persistence
/// failures never prevent a local save, and callers read from here first.
pub struct LocalProfileCache {
    path: PathBuf,
}

impl LocalProfileCache {
    /// Cache rooted in the platform data directory
    ///
    /// # Errors
    ///
    /// Returns a config error when the platform exposes no data directory.
    pub fn new() -> AppResult<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| AppError::config("No platform data directory available"))?;
        Ok(Self::at(base.join(APP_DIR)))
    }

    /// Cache rooted in an explicit directory (used by tests)
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(PROFILE_FILE),
        }
    }

    /// Load the stored profile, if any
    ///
    /// A corrupt blob is treated as absent and logged, not propagated: the
    /// caller falls back to onboarding rather than failing.
    #[must_use]
    pub fn load(&self) -> Option<UserProfile> {
        let data = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt profile blob");
                None
            }
        }
    }

    /// Persist the profile, replacing any previous blob
    ///
    /// # Errors
    ///
    /// Returns an internal error if the directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, profile: &UserProfile) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Failed to create data dir: {e}")))?;
        }
        let data = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, data)
            .map_err(|e| AppError::internal(format!("Failed to write profile blob: {e}")))
    }

    /// Discard the stored profile (account clear)
    ///
    /// # Errors
    ///
    /// Returns an internal error if the blob exists but cannot be removed.
    pub fn clear(&self) -> AppResult<()> {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                return Err(AppError::internal(format!(
                    "Failed to clear profile blob: {e}"
                )));
            }
        }
        Ok(())
    }
}
