//! # Completion Providers
//!
//! The gateway talks to a text-completion service through [`CompletionProvider`].
//! [`GenaiProvider`] is the real implementation (rust-genai client with a fixed
//! API key); [`DisabledProvider`] answers every call with an error and is used
//! when no key is configured.

use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatResponseFormat};
use genai::resolver::{AuthData, AuthResolver};
use genai::Client;
use thiserror::Error;
use tracing::debug;

// region: --- Request

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: PromptRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: PromptRole::Assistant, content: content.into() }
    }
}

/// One structured prompt: an optional system instruction followed by ordered turns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<PromptMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    /// Ask the provider for a JSON object reply
    pub json_mode: bool,
}

impl CompletionRequest {
    pub fn with_system(system: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            ..Default::default()
        }
    }

    pub fn message(mut self, message: PromptMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

// endregion: --- Request

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("completion provider is not configured")]
    Disabled,

    #[error("completion request failed: {0}")]
    Request(String),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Run one completion. `Ok(None)` means the provider returned no text.
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, ProviderError>;
}

// region: --- GenaiProvider

pub struct GenaiProvider {
    client: Client,
    model: String,
}

impl GenaiProvider {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        let auth_resolver = AuthResolver::from_resolver_fn(
            move |_model_iden| -> Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(api_key.clone())))
            },
        );

        let client = Client::builder()
            .with_auth_resolver(auth_resolver)
            .build();

        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for GenaiProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, ProviderError> {
        let mut chat_req = ChatRequest::default();
        if let Some(system) = &request.system {
            chat_req = chat_req.with_system(system);
        }
        for msg in &request.messages {
            chat_req = match msg.role {
                PromptRole::User => chat_req.append_message(ChatMessage::user(&msg.content)),
                PromptRole::Assistant => chat_req.append_message(ChatMessage::assistant(&msg.content)),
            };
        }

        let mut chat_options = ChatOptions::default();
        if let Some(temperature) = request.temperature {
            chat_options = chat_options.with_temperature(temperature);
        }
        if let Some(max_tokens) = request.max_tokens {
            chat_options = chat_options.with_max_tokens(max_tokens);
        }
        if request.json_mode {
            chat_options = chat_options.with_response_format(ChatResponseFormat::JsonMode);
        }

        debug!("[AI] Calling completion API with model: {}", self.model);
        let chat_res = self
            .client
            .exec_chat(&self.model, chat_req, Some(&chat_options))
            .await
            .map_err(|e| ProviderError::Request(format!("{:?}", e)))?;

        Ok(chat_res.first_text().map(|text| text.to_string()))
    }
}

// endregion: --- GenaiProvider

/// Provider used when no API key is configured.
pub struct DisabledProvider;

#[async_trait]
impl CompletionProvider for DisabledProvider {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<Option<String>, ProviderError> {
        Err(ProviderError::Disabled)
    }
}

// region: --- Test support

#[cfg(test)]
pub(crate) mod scripted {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays queued replies and records every request it receives.
    #[derive(Default)]
    pub struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<Option<String>, ProviderError>>>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, text: &str) -> Self {
            self.push(Ok(Some(text.to_string())))
        }

        pub fn empty(self) -> Self {
            self.push(Ok(None))
        }

        pub fn fail(self, reason: &str) -> Self {
            self.push(Err(ProviderError::Request(reason.to_string())))
        }

        fn push(self, reply: Result<Option<String>, ProviderError>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub fn last_request(&self) -> CompletionRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, ProviderError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ProviderError::Request("no scripted reply".into())))
        }
    }
}

// endregion: --- Test support
