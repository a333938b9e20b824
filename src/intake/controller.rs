// ABOUTME: Turn-budgeted intake conversation controller
// ABOUTME: Drives user input through the completion backend, enforces the follow-up cap, and launches report synthesis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

use crate::errors::{AppError, AppResult};
use crate::intake::session::{ConversationSession, SessionState};
use crate::llm::{prompts, CompletionBackend};
use crate::models::{ChatMessage, CheckInterval, UserProfile};
use crate::store::ProfileStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Known placeholder credential that must never reach the network
const PLACEHOLDER_API_KEY: &str = "YOUR_OPENAI_API_KEY";

/// Outcome channel for background report synthesis
///
/// The caller may await the handle to observe the synthesized report (or
/// its failure), or drop it; the task runs to completion either way.
pub type ReportHandle = JoinHandle<AppResult<String>>;

/// Result of one accepted user turn
#[derive(Debug)]
pub enum TurnOutcome {
    /// The assistant asked another question; the conversation continues
    FollowUp {
        /// Assistant reply text, already appended to the session
        reply: String,
    },
    /// The backend call failed; a human-readable notice was appended and
    /// the conversation stays open awaiting the next user input
    Notice {
        /// Notice text, already appended to the session
        message: String,
    },
    /// The session reached its terminal state and report synthesis started
    Complete {
        /// Final assistant message, already appended to the session
        reply: String,
        /// Handle to the detached report-synthesis task
        report: ReportHandle,
    },
}

/// Drives a single wellness-check interview
///
/// Owns the conversation session and the follow-up budget. The profile
/// context is passed in explicitly at construction; there is no ambient
/// current-user state.
pub struct IntakeController {
    backend: Arc<dyn CompletionBackend>,
    store: Arc<dyn ProfileStore>,
    api_key: String,
    profile_id: Option<i64>,
    session: ConversationSession,
}

impl IntakeController {
    /// New controller with a fresh session
    #[must_use]
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        store: Arc<dyn ProfileStore>,
        api_key: impl Into<String>,
        profile_id: Option<i64>,
    ) -> Self {
        Self {
            backend,
            store,
            api_key: api_key.into(),
            profile_id,
            session: ConversationSession::new(),
        }
    }

    /// The owned session, for inspection
    #[must_use]
    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Submit one user input and run a full protocol turn
    ///
    /// Validates the input and credential, appends the user message, issues
    /// one completion request parameterized by the current follow-up count,
    /// appends the reply, and applies the completion rules: the canonical
    /// phrase in the reply ends the session, and once the follow-up budget
    /// is exhausted the controller forces the terminal state with a canned
    /// recommendation regardless of the model's compliance.
    ///
    /// # Errors
    ///
    /// Returns a validation error, with no network call and no session
    /// mutation, when the trimmed input is empty, the session is already
    /// complete, or the credential is a known placeholder or fails the
    /// prefix/length sanity check. Backend failures are not errors here:
    /// they surface as [`TurnOutcome::Notice`].
    pub async fn submit_user_input(&mut self, text: &str) -> AppResult<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input("Message text must not be empty"));
        }
        if self.session.is_complete() {
            return Err(AppError::invalid_input(
                "The wellness check is already complete",
            ));
        }
        if let Some(message) = credential_error(&self.api_key) {
            return Err(AppError::invalid_input(message));
        }

        let system_prompt = prompts::interview_prompt(self.session.follow_ups_asked());
        let history: Vec<ChatMessage> = self.session.messages().to_vec();
        self.session.push_user(text);

        let reply = match self
            .backend
            .send_message(text, &history, &system_prompt)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "completion request failed");
                let message = human_message(&e);
                self.session.push_notice(message.clone());
                return Ok(TurnOutcome::Notice { message });
            }
        };

        if self.session.push_assistant(reply.clone()) {
            debug!("completion phrase detected, session complete");
            return Ok(TurnOutcome::Complete {
                reply,
                report: self.spawn_report_synthesis(),
            });
        }

        if self.session.follow_ups_asked() >= prompts::MAX_FOLLOW_UPS {
            info!(
                cap = prompts::MAX_FOLLOW_UPS,
                "follow-up budget exhausted, forcing completion"
            );
            let closing = capped_closing_message();
            self.session.force_complete(closing.clone());
            return Ok(TurnOutcome::Complete {
                reply: closing,
                report: self.spawn_report_synthesis(),
            });
        }

        Ok(TurnOutcome::FollowUp { reply })
    }

    /// Classify a profile into a recommended check interval
    ///
    /// Issues one tightly constrained completion request, extracts the
    /// first run of digits from the reply, and snaps it to the nearest
    /// allowed interval. Any backend failure or unparseable reply falls
    /// back to the monthly default.
    pub async fn recommend_check_interval(&self, profile: &UserProfile) -> CheckInterval {
        let context = prompts::frequency_context(profile);
        let reply = match self
            .backend
            .send_constrained(&prompts::frequency_prompt(), &context)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "frequency classification failed, using default");
                return CheckInterval::default();
            }
        };

        let digits: String = reply
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        match digits.parse::<i64>() {
            Ok(days) => CheckInterval::from_days(days),
            Err(_) => {
                warn!(reply = %reply, "no integer in frequency reply, using default");
                CheckInterval::default()
            }
        }
    }

    /// Detach the report-synthesis task for the completed session
    fn spawn_report_synthesis(&self) -> ReportHandle {
        debug_assert_eq!(self.session.state(), SessionState::Complete);
        let backend = Arc::clone(&self.backend);
        let store = Arc::clone(&self.store);
        let profile_id = self.profile_id;
        let transcript = self.session.transcript();
        tokio::spawn(async move {
            synthesize_report(backend.as_ref(), store.as_ref(), profile_id, &transcript).await
        })
    }
}

/// Synthesize and persist the wellness report for a completed session
///
/// Fetching the stored medical fields is best-effort: on failure the
/// summary proceeds without profile context. Completion and persistence
/// failures are logged and returned through the outcome channel; nothing
/// retries and nothing reaches the conversation state.
async fn synthesize_report(
    backend: &dyn CompletionBackend,
    store: &dyn ProfileStore,
    profile_id: Option<i64>,
    transcript: &str,
) -> AppResult<String> {
    let Some(id) = profile_id else {
        warn!("no profile identifier, skipping report synthesis");
        return Err(AppError::invalid_input(
            "No profile identifier available for report synthesis",
        ));
    };

    let context = match store.fetch(id).await {
        Ok(snapshot) => Some(snapshot.formatted_context()),
        Err(e) => {
            warn!(user_id = id, error = %e, "profile fetch failed, summarizing without context");
            None
        }
    };

    let prompt = prompts::summary_prompt(context.as_deref());
    let report = backend
        .send_message(transcript, &[], &prompt)
        .await
        .inspect_err(|e| warn!(user_id = id, error = %e, "report completion failed"))?;

    store
        .update_report(id, &report)
        .await
        .inspect_err(|e| warn!(user_id = id, error = %e, "report persistence failed"))?;

    info!(user_id = id, "wellness report saved");
    Ok(report)
}

/// Canned terminal message used when the follow-up budget runs out
fn capped_closing_message() -> String {
    format!(
        "Based on what you've shared so far, I recommend scheduling an appointment with \
         your doctor to review your symptoms in person. {}",
        prompts::COMPLETION_SENTENCE
    )
}

/// Local credential sanity checks, run before any network call
fn credential_error(api_key: &str) -> Option<&'static str> {
    let key = api_key.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        return Some("No API key is configured. Please add your OpenAI API key and try again.");
    }
    if !key.starts_with("sk-") || key.len() <= 20 {
        return Some("The configured API key looks invalid. Please check it and try again.");
    }
    None
}

/// Map a backend failure to the human-readable notice shown in conversation
fn human_message(err: &AppError) -> String {
    match err {
        AppError::Auth(_) => {
            "Your API key appears to be invalid. Please check it and try again.".to_owned()
        }
        AppError::Api { status: 429, .. } => {
            "The service is receiving too many requests right now. Please wait a moment and try \
             again."
                .to_owned()
        }
        AppError::Api { message, .. }
            if message.to_lowercase().contains("quota")
                || message.to_lowercase().contains("billing") =>
        {
            "Your account has reached its usage limit. Please check your billing details."
                .to_owned()
        }
        AppError::Transport(_) => {
            "I couldn't reach the service. Please check your connection and try again.".to_owned()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_checks_catch_placeholder_and_malformed_keys() {
        assert!(credential_error("").is_some());
        assert!(credential_error("  ").is_some());
        assert!(credential_error(PLACEHOLDER_API_KEY).is_some());
        assert!(credential_error("sk-short").is_some());
        assert!(credential_error("pk-0123456789abcdef0123").is_some());
        assert!(credential_error("sk-0123456789abcdef0123456789").is_none());
    }

    #[test]
    fn human_messages_cover_the_error_taxonomy() {
        assert!(human_message(&AppError::auth_invalid("401")).contains("API key"));
        assert!(human_message(&AppError::api(429, "slow down")).contains("too many requests"));
        assert!(
            human_message(&AppError::api(400, "You exceeded your current quota"))
                .contains("usage limit")
        );
        assert!(human_message(&AppError::transport("timed out")).contains("connection"));
        let raw = human_message(&AppError::api(500, "upstream exploded"));
        assert!(raw.contains("upstream exploded"));
    }

    #[test]
    fn capped_closing_message_contains_terminal_sentence() {
        let closing = capped_closing_message();
        assert!(closing
            .to_lowercase()
            .contains(prompts::COMPLETION_PHRASE));
    }
}
