//! Generation client: the single point of entry for calls to the
//! generative-text service.
//!
//! No other module may call the service directly. The orchestrator depends
//! only on the [`GenerationClient`] trait so tests can swap in a
//! deterministic double.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::pipeline::types::Prompt;

const MAX_TOKENS: u32 = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generation service credential is not configured")]
    MissingCredential,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned status {status}: {message}")]
    ServiceStatus { status: u16, message: String },

    #[error("service reply envelope could not be read: {0}")]
    InvalidEnvelope(String),
}

impl GenerationError {
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => "missing_credential",
            GenerationError::Transport(_) => "transport",
            GenerationError::ServiceStatus { .. } => "service_status",
            GenerationError::InvalidEnvelope(_) => "invalid_envelope",
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Transport("request timed out".to_string())
        } else {
            GenerationError::Transport(e.to_string())
        }
    }
}

/// Sends a prompt to the generative-text service and returns its raw reply.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: ServiceErrorBody,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiGenerationClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl OpenAiGenerationClient {
    /// `timeout` bounds the whole request; exceeding it is a transport error.
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        model: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build generation HTTP client")?;
        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn credential(&self) -> Result<&str, GenerationError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::MissingCredential)
    }
}

#[async_trait]
impl GenerationClient for OpenAiGenerationClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        // Checked before any network activity.
        let api_key = self.credential()?;

        let body = ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.as_str(),
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServiceError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            warn!("Generation service returned {}: {}", status, message);
            return Err(GenerationError::ServiceStatus {
                status: status.as_u16(),
                message,
            });
        }

        let reply = completion_text(&text)?;
        debug!("Generation call succeeded: {} characters", reply.len());
        Ok(reply)
    }
}

/// Pulls the assistant text out of a chat-completions response body.
pub fn completion_text(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::InvalidEnvelope(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GenerationError::InvalidEnvelope("reply carried no content".to_string()))
}
