// ABOUTME: Profile store abstraction for remote persistence and local caching
// ABOUTME: Defines the ProfileStore trait and re-exports HTTP and local-file implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! Profile persistence abstraction
//!
//! [`ProfileStore`] is the seam between the intake controller and the
//! remote persistence API; [`LocalProfileCache`] is the device-local blob
//! with local-first semantics (the local copy stays authoritative for the
//! caller regardless of remote outcome).

mod http;
mod local;
mod sync;

pub use http::HttpProfileStore;
pub use local::LocalProfileCache;
pub use sync::SyncedProfileStore;

use crate::errors::AppResult;
use crate::models::{CheckInterval, ProfileSnapshot, UserProfile};
use async_trait::async_trait;

/// CRUD bridge to the remote persistence API for one profile and its two
/// derived fields (wellness report and check interval)
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Persist a new profile, returning its opaque identifier
    ///
    /// # Errors
    ///
    /// Returns a persistence error on any non-2xx response.
    async fn create(&self, profile: &UserProfile) -> AppResult<i64>;

    /// Overwrite a stored profile's demographic and medical fields
    ///
    /// The wellness report and check interval are not part of this payload;
    /// they have their own operations.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on any non-2xx/204 response.
    async fn update(&self, id: i64, profile: &UserProfile) -> AppResult<()>;

    /// Replace the stored wellness report
    ///
    /// # Errors
    ///
    /// Returns a persistence error on any non-2xx/204 response.
    async fn update_report(&self, id: i64, report: &str) -> AppResult<()>;

    /// Replace the stored check interval
    ///
    /// # Errors
    ///
    /// Returns a persistence error on any non-2xx/204 response.
    async fn update_interval(&self, id: i64, interval: CheckInterval) -> AppResult<()>;

    /// Fetch the stored medical fields, substituting `""` for absent fields
    ///
    /// # Errors
    ///
    /// Returns a persistence error on any non-2xx response.
    async fn fetch(&self, id: i64) -> AppResult<ProfileSnapshot>;

    /// Fetch the stored check interval in days
    ///
    /// Defaults to 30 when the stored value is absent or unparseable.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on any non-2xx response.
    async fn fetch_interval(&self, id: i64) -> AppResult<u32>;
}
