// ABOUTME: Conversation session state for a single wellness-check interview
// ABOUTME: Tracks ordered messages, the follow-up counter, and the completion state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

use crate::llm::prompts::COMPLETION_PHRASE;
use crate::models::{ChatMessage, MessageRole};
use std::fmt::Write as _;

/// Fixed welcome message shown when a wellness-check session opens
///
/// Excluded from the follow-up count.
pub const WELCOME_MESSAGE: &str = "Hello! Welcome to your wellness check. I'm here to ask you a \
     few questions about how you've been feeling. How are you doing today?";

/// Where a session is in the interview protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial state; only the welcome message has been shown
    Welcomed,
    /// A user input has been accepted and a completion request is in flight
    AwaitingReply,
    /// An assistant reply without the terminal phrase has been appended
    FollowUp,
    /// Terminal; an assistant reply contained the canonical completion phrase
    Complete,
}

/// One wellness-check conversation
///
/// Sessions are created fresh each time the wellness-check screen opens and
/// never resumed across openings. Messages are append-only; ordering is
/// insertion order.
#[derive(Debug)]
pub struct ConversationSession {
    messages: Vec<ChatMessage>,
    state: SessionState,
}

impl ConversationSession {
    /// Fresh session seeded with the fixed welcome message
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            state: SessionState::Welcomed,
        }
    }

    /// All messages in insertion order, welcome included
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current protocol state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session has reached its terminal state
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Complete)
    }

    /// Follow-up questions asked so far: assistant turns excluding the welcome
    #[must_use]
    pub fn follow_ups_asked(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .count()
            .saturating_sub(1)
    }

    /// Append a user message and mark a completion request in flight
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
        self.state = SessionState::AwaitingReply;
    }

    /// Append an assistant reply, transitioning on the canonical phrase
    ///
    /// Returns `true` when the reply completed the session.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        let completes = reply_completes(&content);
        self.messages.push(ChatMessage::assistant(content));
        self.state = if completes {
            SessionState::Complete
        } else {
            SessionState::FollowUp
        };
        completes
    }

    /// Append an assistant-styled notice without touching the protocol state
    ///
    /// Used for human-readable error messages; the conversation stays open
    /// and awaiting the next user input.
    pub fn push_notice(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
        self.state = SessionState::FollowUp;
    }

    /// Force the terminal state with a final assistant message
    ///
    /// Used when the follow-up cap is reached regardless of the model's
    /// compliance with the prompted limit.
    pub fn force_complete(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
        self.state = SessionState::Complete;
    }

    /// Full transcript as `"<origin>: <content>"` lines in chronological order
    #[must_use]
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            let _ = writeln!(out, "{}: {}", message.role.as_str(), message.content);
        }
        out
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a reply's lower-cased text contains the canonical completion phrase
#[must_use]
pub fn reply_completes(reply: &str) -> bool {
    reply.to_lowercase().contains(COMPLETION_PHRASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_has_welcome_and_zero_follow_ups() {
        let session = ConversationSession::new();
        assert_eq!(session.state(), SessionState::Welcomed);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, WELCOME_MESSAGE);
        assert_eq!(session.follow_ups_asked(), 0);
    }

    #[test]
    fn follow_up_counter_excludes_welcome() {
        let mut session = ConversationSession::new();
        session.push_user("I have a headache");
        assert_eq!(session.follow_ups_asked(), 0);
        assert_eq!(session.state(), SessionState::AwaitingReply);

        assert!(!session.push_assistant("How long has it lasted?"));
        assert_eq!(session.follow_ups_asked(), 1);
        assert_eq!(session.state(), SessionState::FollowUp);

        session.push_user("Two days");
        assert!(!session.push_assistant("Any fever alongside it?"));
        assert_eq!(session.follow_ups_asked(), 2);
    }

    #[test]
    fn completion_phrase_is_case_insensitive_substring() {
        let mut session = ConversationSession::new();
        session.push_user("fine");
        assert!(session.push_assistant(
            "No appointment needed. THANK YOU FOR COMPLETING THE WELLNESS CHECK."
        ));
        assert!(session.is_complete());
    }

    #[test]
    fn near_miss_does_not_complete() {
        assert!(!reply_completes("thank you for completing the wellness"));
        assert!(!reply_completes("thanks for completing the wellness check"));
        assert!(reply_completes(
            "thank you for completing the wellness check"
        ));
    }

    #[test]
    fn transcript_uses_origin_prefixed_lines() {
        let mut session = ConversationSession::new();
        session.push_user("I feel dizzy");
        session.push_assistant("When did it start?");
        let transcript = session.transcript();
        let lines: Vec<&str> = transcript.lines().collect();
        assert_eq!(lines[0], format!("assistant: {WELCOME_MESSAGE}"));
        assert_eq!(lines[1], "user: I feel dizzy");
        assert_eq!(lines[2], "assistant: When did it start?");
    }

    #[test]
    fn notice_keeps_conversation_open() {
        let mut session = ConversationSession::new();
        session.push_user("hello");
        session.push_notice("Network issue, please try again.");
        assert!(!session.is_complete());
        // Notices are assistant turns, so the prompt counter reflects
        // everything the user saw
        assert_eq!(session.follow_ups_asked(), 1);
    }
}
