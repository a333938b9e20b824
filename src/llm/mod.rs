// ABOUTME: Completion backend abstraction for LLM chat integration
// ABOUTME: Defines the CompletionBackend trait and re-exports the OpenAI client and prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! Completion backend abstraction
//!
//! The intake controller talks to the chat-completion service only through
//! [`CompletionBackend`], so tests can substitute a canned backend and the
//! concrete HTTP client stays swappable.

mod openai;
pub mod prompts;

pub use openai::OpenAiClient;

use crate::errors::AppResult;
use crate::models::ChatMessage;
use async_trait::async_trait;

/// Stateless request/reply bridge to a chat-completion service
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one conversational turn
    ///
    /// Builds an ordered message list from the system prompt, the trailing
    /// window of `history`, and `user_message`, and returns the assistant's
    /// reply text.
    ///
    /// # Errors
    ///
    /// Returns an auth error on HTTP 401, an API error carrying the
    /// upstream status otherwise, or a transport error on timeout or
    /// connection failure.
    async fn send_message(
        &self,
        user_message: &str,
        history: &[ChatMessage],
        system_prompt: &str,
    ) -> AppResult<String>;

    /// Send a single tightly constrained request
    ///
    /// Used for numeric-only classification prompts: lower randomness and a
    /// short output cap, no conversation history.
    ///
    /// # Errors
    ///
    /// Same contract as [`CompletionBackend::send_message`].
    async fn send_constrained(&self, system_prompt: &str, user_context: &str) -> AppResult<String>;
}
