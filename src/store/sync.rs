// ABOUTME: Local-first profile persistence combining the local cache and the remote store
// ABOUTME: The local blob is written unconditionally; remote failures are logged, never surfaced
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

use crate::errors::AppResult;
use crate::models::UserProfile;
use crate::store::{LocalProfileCache, ProfileStore};
use std::sync::Arc;
use tracing::warn;

/// Local-first profile persistence
///
/// The device-local copy is authoritative for the caller: every save
/// writes it first, and a remote failure leaves the local copy in place
/// with only a log line. A successful remote create back-fills the
/// assigned id into the local blob.
pub struct SyncedProfileStore {
    remote: Arc<dyn ProfileStore>,
    local: LocalProfileCache,
}

impl SyncedProfileStore {
    /// Combine a remote store with the local cache
    #[must_use]
    pub fn new(remote: Arc<dyn ProfileStore>, local: LocalProfileCache) -> Self {
        Self { remote, local }
    }

    /// Persist the profile locally, then best-effort remotely
    ///
    /// Returns the profile as saved, with the id filled in when the remote
    /// create assigned one.
    ///
    /// # Errors
    ///
    /// Returns an error only when the local write fails; remote failures
    /// are logged and swallowed.
    pub async fn save(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let mut saved = profile.clone();
        self.local.save(&saved)?;

        match saved.id {
            Some(id) => {
                if let Err(e) = self.remote.update(id, &saved).await {
                    warn!(user_id = id, error = %e, "remote profile update failed, local copy kept");
                }
            }
            None => match self.remote.create(&saved).await {
                Ok(id) => {
                    saved.id = Some(id);
                    self.local.save(&saved)?;
                }
                Err(e) => {
                    warn!(error = %e, "remote profile create failed, local copy kept");
                }
            },
        }

        Ok(saved)
    }

    /// Load the locally stored profile, if any
    #[must_use]
    pub fn load(&self) -> Option<UserProfile> {
        self.local.load()
    }

    /// Account clear: discard the local profile
    ///
    /// # Errors
    ///
    /// Returns an error if the local blob cannot be removed.
    pub fn clear(&self) -> AppResult<()> {
        self.local.clear()
    }
}
