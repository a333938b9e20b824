// ABOUTME: Core data models for user profiles, chat messages, and check intervals
// ABOUTME: Defines UserProfile, ProfileSnapshot, ChatMessage, MessageRole, and CheckInterval
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! Common data models shared by the intake controller, the completion
//! client, the store clients, and the persistence routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use uuid::Uuid;

/// A user's demographic and medical profile
///
/// Created by onboarding, mutated by profile edits and by the intake
/// controller (report and check interval). Height and weight are free-form
/// display strings (e.g. `5'9"`, `160lbs`), never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque store identifier; `None` until first persisted
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Biological sex label
    pub sex: String,
    /// Height display string
    pub height: String,
    /// Weight display string
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
    /// Recommended days between wellness checks, when one has been derived
    #[serde(default)]
    pub check_interval: Option<CheckInterval>,
    /// Generated wellness report, when one has been synthesized
    #[serde(default)]
    pub wellness_report: Option<String>,
}

impl UserProfile {
    /// Onboarding is complete once the minimum demographic fields are set
    #[must_use]
    pub fn has_completed_onboarding(&self) -> bool {
        !self.name.is_empty() && self.age > 0 && !self.height.is_empty() && !self.weight.is_empty()
    }
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The person being interviewed
    User,
    /// The completion backend
    Assistant,
}

impl MessageRole {
    /// Wire-format role tag used by the completion API and transcripts
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in an intake conversation
///
/// Immutable once created; ordering is insertion order within the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier
    pub id: Uuid,
    /// Message text
    pub content: String,
    /// Message origin
    pub role: MessageRole,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user-authored message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, MessageRole::User)
    }

    /// Create an assistant-authored message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, MessageRole::Assistant)
    }

    fn new(content: impl Into<String>, role: MessageRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }
}

/// Recommended number of days between wellness checks
///
/// Constrained to a closed set; arbitrary integers snap to the nearest
/// member by absolute difference, with the lowest value winning ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum CheckInterval {
    /// Daily checks for high-risk profiles
    Daily,
    /// Every two days
    EveryTwoDays,
    /// Weekly
    Weekly,
    /// Every two weeks
    BiWeekly,
    /// Monthly; the default for healthy profiles
    Monthly,
}

impl CheckInterval {
    /// All members in ascending order of days
    pub const ALL: [Self; 5] = [
        Self::Daily,
        Self::EveryTwoDays,
        Self::Weekly,
        Self::BiWeekly,
        Self::Monthly,
    ];

    /// Interval length in days
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::Daily => 1,
            Self::EveryTwoDays => 2,
            Self::Weekly => 7,
            Self::BiWeekly => 14,
            Self::Monthly => 30,
        }
    }

    /// Snap an arbitrary day count to the nearest allowed interval
    ///
    /// Nearest by absolute difference; the ascending scan with a strict
    /// comparison means the lowest of equally-close candidates wins.
    #[must_use]
    pub fn from_days(days: i64) -> Self {
        let mut best = Self::Monthly;
        let mut best_distance = i64::MAX;
        for candidate in Self::ALL {
            let distance = (i64::from(candidate.days()) - days).abs();
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }
}

impl Default for CheckInterval {
    fn default() -> Self {
        Self::Monthly
    }
}

impl From<CheckInterval> for u32 {
    fn from(interval: CheckInterval) -> Self {
        interval.days()
    }
}

impl TryFrom<u32> for CheckInterval {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.days() == days)
            .ok_or_else(|| format!("{days} is not an allowed check interval"))
    }
}

/// The medical fields of a stored profile, as fetched from the store
///
/// Every field defaults to the empty string when absent from the stored
/// record, so callers never have to distinguish missing from blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Age as stored (string-typed in the store)
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

impl ProfileSnapshot {
    /// Render the non-empty fields as a context block for summarization prompts
    #[must_use]
    pub fn formatted_context(&self) -> String {
        let mut context = String::from("Patient Health Profile (anonymized):\n");
        let fields = [
            ("Age", &self.age),
            ("Biological Sex", &self.sex),
            ("Height", &self.height),
            ("Weight", &self.weight),
            ("Medical Background", &self.medical_background),
            ("Chronic Conditions", &self.chronic_conditions),
            ("Current Medications", &self.current_medications),
            ("Hereditary Risk Patterns", &self.hereditary_risk_patterns),
        ];
        for (label, value) in fields {
            if !value.is_empty() {
                let _ = writeln!(context, "- {label}: {value}");
            }
        }
        context
    }
}
