//! Follow-up chat about an analysed document.
//!
//! A panel is seeded once with the analysis summary and keeps its own
//! history and request state, independent of the form controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{AnalysisBackend, ChatRequest};
use crate::error::ApiFailure;

pub const EMPTY_QUESTION_MESSAGE: &str = "Please enter a question";

pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get a response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ChatPanel {
    context: String,
    messages: Vec<ChatMessage>,
    loading: bool,
    error: String,
}

impl ChatPanel {
    pub fn new(context: impl Into<String>) -> Self {
        ChatPanel {
            context: context.into(),
            messages: Vec::new(),
            loading: false,
            error: String::new(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }

    /// Send a follow-up question and append the answer to the history.
    ///
    /// Returns the answer, or `None` when the question was rejected or the
    /// request failed (see [`ChatPanel::error`]).
    pub async fn ask<B: AnalysisBackend>(&mut self, backend: &B, question: &str) -> Option<&str> {
        let question = question.trim();
        if question.is_empty() {
            self.error = EMPTY_QUESTION_MESSAGE.to_string();
            return None;
        }
        if self.loading {
            return None;
        }

        self.messages.push(ChatMessage {
            role: Role::User,
            content: question.to_string(),
            sent_at: Utc::now(),
        });
        self.loading = true;
        self.error.clear();

        let request = ChatRequest {
            question: question.to_string(),
            context: self.context.clone(),
        };
        tracing::debug!(history = self.messages.len(), "sending chat question");
        let outcome = backend.chat(&request).await;
        self.loading = false;

        match outcome {
            Ok(response) => {
                self.messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: response.answer,
                    sent_at: Utc::now(),
                });
                self.messages.last().map(|m| m.content.as_str())
            }
            Err(failure) => {
                tracing::warn!(error = %failure, "chat request failed");
                self.error = chat_failure_message(&failure);
                None
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.messages.clear();
        self.error.clear();
    }
}

fn chat_failure_message(failure: &ApiFailure) -> String {
    failure
        .detail()
        .or_else(|| failure.transport_message())
        .unwrap_or(CHAT_FAILURE_MESSAGE)
        .to_string()
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;
