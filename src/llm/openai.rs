// ABOUTME: OpenAI-shaped chat-completion HTTP client
// ABOUTME: Implements CompletionBackend over reqwest with typed request/response records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

use crate::config::CompletionConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::CompletionBackend;
use crate::models::ChatMessage;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of trailing history messages included in each request
const HISTORY_WINDOW: usize = 10;

/// Sampling temperature for conversational turns
const CHAT_TEMPERATURE: f32 = 0.7;

/// Output cap for conversational turns
const CHAT_MAX_TOKENS: u32 = 500;

/// Sampling temperature for numeric classification
const CONSTRAINED_TEMPERATURE: f32 = 0.3;

/// Output cap for numeric classification (a number, nothing more)
const CONSTRAINED_MAX_TOKENS: u32 = 10;

/// Reply used when the backend returns an empty choice list
const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't process that.";

// ============================================================================
// Wire Types
// ============================================================================

/// One role-tagged message in the request body
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat-completion request body
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

/// Chat-completion success body
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Chat-completion error body
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for an `OpenAI`-compatible chat-completion endpoint
///
/// Stateless between calls; the only held state is the configuration and
/// the connection pool inside [`reqwest::Client`].
pub struct OpenAiClient {
    config: CompletionConfig,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be
    /// built with the configured timeout.
    pub fn new(config: CompletionConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Issue one completion request and extract the first choice's text
    async fn complete(&self, request: CompletionRequest<'_>) -> AppResult<String> {
        debug!(
            messages = request.messages.len(),
            model = request.model,
            "sending completion request"
        );

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::transport(format!("Completion request timed out: {e}"))
                } else {
                    AppError::transport(format!("Completion request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {body}"));

            if status == StatusCode::UNAUTHORIZED {
                return Err(AppError::auth_invalid(message));
            }
            return Err(AppError::api(status.as_u16(), message));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::api(status.as_u16(), format!("JSON parse error: {e}")))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .map_or_else(|| EMPTY_REPLY_FALLBACK.to_owned(), |c| c.message.content))
    }

    /// Build the ordered message list: system, trailing history window, new user text
    fn build_messages<'a>(
        system_prompt: &'a str,
        history: &'a [ChatMessage],
        user_message: &'a str,
    ) -> Vec<WireMessage<'a>> {
        let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];

        let mut messages = Vec::with_capacity(recent.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: system_prompt,
        });
        for msg in recent {
            messages.push(WireMessage {
                role: msg.role.as_str(),
                content: &msg.content,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: user_message,
        });
        messages
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn send_message(
        &self,
        user_message: &str,
        history: &[ChatMessage],
        system_prompt: &str,
    ) -> AppResult<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages: Self::build_messages(system_prompt, history, user_message),
            temperature: CHAT_TEMPERATURE,
            max_tokens: CHAT_MAX_TOKENS,
        };
        self.complete(request).await
    }

    async fn send_constrained(&self, system_prompt: &str, user_context: &str) -> AppResult<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: system_prompt,
                },
                WireMessage {
                    role: "user",
                    content: user_context,
                },
            ],
            temperature: CONSTRAINED_TEMPERATURE,
            max_tokens: CONSTRAINED_MAX_TOKENS,
        };
        self.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_list_keeps_system_first_and_windows_history() {
        let history: Vec<ChatMessage> = (0..15)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::assistant(format!("q{i}"))
                } else {
                    ChatMessage::user(format!("a{i}"))
                }
            })
            .collect();

        let messages = OpenAiClient::build_messages("system text", &history, "new input");

        // system + 10-message window + new user message
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "system text");
        // Window keeps the most recent entries
        assert_eq!(messages[1].content, "a5");
        assert_eq!(messages[11].role, "user");
        assert_eq!(messages[11].content, "new input");
    }

    #[test]
    fn short_history_is_passed_whole() {
        let history = vec![ChatMessage::assistant("welcome")];
        let messages = OpenAiClient::build_messages("s", &history, "hi");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[1].content, "welcome");
    }
}
