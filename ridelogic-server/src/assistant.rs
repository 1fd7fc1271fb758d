//! Contract for the external question-answering service.
//!
//! The crate ships no model client. Deployments provide an
//! implementation of [`TransitAssistant`]; without one, the assistant
//! endpoints answer 503.

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};

/// Errors from an assistant backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    /// No backend is configured
    #[error("assistant is not configured")]
    NotConfigured,

    /// The backend returned an error or an unusable answer
    #[error("assistant request failed: {0}")]
    Upstream(String),
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of a prior conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// A request for the best departures between two places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestTimesRequest {
    /// Timetable documents to consult.
    pub documents: Vec<String>,
    /// Desired departure time, free text.
    pub time: String,
    pub from: String,
    pub to: String,
}

/// Answers free-text transit questions.
pub trait TransitAssistant: Send + Sync {
    /// Answer `prompt` in the context of earlier turns.
    fn ask<'a>(
        &'a self,
        prompt: &'a str,
        history: &'a [ChatMessage],
    ) -> BoxFuture<'a, Result<String, AssistantError>>;

    /// Suggest the best departures using the named timetables as ground truth.
    fn best_times<'a>(
        &'a self,
        request: &'a BestTimesRequest,
    ) -> BoxFuture<'a, Result<String, AssistantError>>;
}

/// Assistant used when no backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredAssistant;

impl TransitAssistant for UnconfiguredAssistant {
    fn ask<'a>(
        &'a self,
        _prompt: &'a str,
        _history: &'a [ChatMessage],
    ) -> BoxFuture<'a, Result<String, AssistantError>> {
        async { Err(AssistantError::NotConfigured) }.boxed()
    }

    fn best_times<'a>(
        &'a self,
        _request: &'a BestTimesRequest,
    ) -> BoxFuture<'a, Result<String, AssistantError>> {
        async { Err(AssistantError::NotConfigured) }.boxed()
    }
}
