//! # AI Chat Gateway
//!
//! Stateless wrapper around a [`CompletionProvider`]:
//!
//! - `chat` keeps the last [`HISTORY_LIMIT`] turns, prefixes the health
//!   assistant instruction and appends the new message.
//! - `analyze_sentiment` asks for a `{rating, confidence}` JSON object and
//!   clamps it into `[1,5]` / `[0,1]`.
//! - `summarize` returns a short summary of arbitrary text.
//!
//! Every provider call is a single attempt bounded by a timeout. Any failure
//! (timeout, provider error, unusable reply) becomes [`AiError::ResponseFailed`].

use lib_core::dto::{ChatTurn, SentimentResponse, TurnRole};
use lib_core::{AppError, Config};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use super::provider::{
    CompletionProvider, CompletionRequest, DisabledProvider, GenaiProvider, PromptMessage, PromptRole,
};

/// Prior turns forwarded with each chat message.
pub const HISTORY_LIMIT: usize = 5;

pub const CHAT_FALLBACK: &str = "I'm sorry, I couldn't process your request right now.";
pub const SUMMARY_FALLBACK: &str = "Unable to summarize text.";

const SUMMARY_MAX_TOKENS: u32 = 300;

pub const HEALTH_ASSISTANT_PROMPT: &str = "You are a helpful AI health assistant for a clinic management app. You can:
- Answer general health questions
- Provide information about symptoms and conditions
- Suggest when to see a doctor
- Give general wellness advice
- Help with appointment-related questions

Important guidelines:
- Always recommend consulting a healthcare professional for serious concerns
- Do not provide specific medical diagnoses
- Keep responses helpful but not overly medical
- Be empathetic and supportive
- Suggest using the app's features when appropriate (booking appointments, finding doctors, etc.)";

const SENTIMENT_PROMPT: &str = "You are a sentiment analysis expert. Analyze the sentiment of the text and provide a rating from 1 to 5 stars and a confidence score between 0 and 1. Respond with JSON in this format: { 'rating': number, 'confidence': number }";

// region: --- Error

#[derive(Debug, Error)]
pub enum AiError {
    /// The reason is logged, never shown to callers.
    #[error("AI response failed")]
    ResponseFailed { reason: String },
}

impl AiError {
    fn failed(reason: impl Into<String>) -> Self {
        AiError::ResponseFailed { reason: reason.into() }
    }
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

// endregion: --- Error

/// Per-call limits applied by the gateway.
#[derive(Debug, Clone, Copy)]
pub struct GatewaySettings {
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

impl From<&Config> for GatewaySettings {
    fn from(config: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.ai_timeout_secs),
            max_tokens: config.ai_max_tokens,
            temperature: config.ai_temperature as f64,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSentiment {
    rating: f64,
    confidence: f64,
}

pub struct AiGateway {
    provider: Arc<dyn CompletionProvider>,
    settings: GatewaySettings,
}

impl AiGateway {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: GatewaySettings) -> Self {
        Self { provider, settings }
    }

    /// Genai-backed gateway when an API key is present, disabled otherwise.
    pub fn from_config(config: &Config) -> Self {
        let provider: Arc<dyn CompletionProvider> = match &config.openai_api_key {
            Some(key) => {
                info!("[AI] Assistant enabled with model {}", config.ai_model);
                Arc::new(GenaiProvider::new(key.clone(), config.ai_model.clone()))
            }
            None => {
                info!("[AI] OPENAI_API_KEY not set - assistant disabled");
                Arc::new(DisabledProvider)
            }
        };
        Self::new(provider, GatewaySettings::from(config))
    }

    /// Reply to `message` given prior `history` (oldest first).
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, AiError> {
        let recent = &history[history.len().saturating_sub(HISTORY_LIMIT)..];
        debug!("[AI] chat: {} history turns, forwarding {}", history.len(), recent.len());

        let mut request = CompletionRequest::with_system(HEALTH_ASSISTANT_PROMPT)
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature);
        for turn in recent {
            request = request.message(PromptMessage {
                role: match turn.role {
                    TurnRole::User => PromptRole::User,
                    TurnRole::Assistant => PromptRole::Assistant,
                },
                content: turn.content.clone(),
            });
        }
        request = request.message(PromptMessage::user(message));

        let reply = self.call(request).await?;
        Ok(non_empty(reply).unwrap_or_else(|| CHAT_FALLBACK.to_string()))
    }

    pub async fn analyze_sentiment(&self, text: &str) -> Result<SentimentResponse, AiError> {
        let request = CompletionRequest::with_system(SENTIMENT_PROMPT)
            .message(PromptMessage::user(text))
            .json_mode();

        let raw = match non_empty(self.call(request).await?) {
            Some(reply) => parse_sentiment(&reply)?,
            None => RawSentiment { rating: 3.0, confidence: 0.5 },
        };

        Ok(SentimentResponse {
            rating: raw.rating.round().clamp(1.0, 5.0) as u8,
            confidence: raw.confidence.clamp(0.0, 1.0),
        })
    }

    pub async fn summarize(&self, text: &str) -> Result<String, AiError> {
        let prompt = format!(
            "Please summarize the following text concisely while maintaining key points:\n\n{}",
            text
        );
        let request = CompletionRequest::default()
            .message(PromptMessage::user(prompt))
            .max_tokens(SUMMARY_MAX_TOKENS);

        let reply = self.call(request).await?;
        Ok(non_empty(reply).unwrap_or_else(|| SUMMARY_FALLBACK.to_string()))
    }

    /// One attempt, bounded by the configured timeout. No retry.
    async fn call(&self, request: CompletionRequest) -> Result<Option<String>, AiError> {
        let provider = self.provider.name().to_string();
        match tokio::time::timeout(self.settings.timeout, self.provider.complete(request)).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(e)) => {
                error!("[AI] provider={} error: {}", provider, e);
                Err(AiError::failed(e.to_string()))
            }
            Err(_) => {
                error!("[AI] provider={} timed out after {:?}", provider, self.settings.timeout);
                Err(AiError::failed("timeout"))
            }
        }
    }
}

fn non_empty(reply: Option<String>) -> Option<String> {
    reply
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Accept a bare JSON object, optionally wrapped in prose or a code fence.
fn parse_sentiment(reply: &str) -> Result<RawSentiment, AiError> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => reply,
    };
    serde_json::from_str(json).map_err(|e| AiError::failed(format!("unparseable sentiment: {}", e)))
}
