//! # AI Assistant DTOs
//!
//! Bodies for `/api/ai/*`.
//!
//! The assistant widget sends its recent transcript as `history`. Items may
//! carry an explicit `role` or the widget's own `isAI` flag; anything that is
//! not recognisably the assistant counts as the user.
//!
//! ```text
//! POST /api/ai/chat
//! { "message": "I have a headache", "history": [ { "content": "Hi!", "isAI": true } ] }
//! ```

use lib_utils::{validate_max_length, validate_not_empty};
use serde::{Deserialize, Serialize};

use super::{check, Validate};
use crate::error::ValidationError;
use crate::model::store::models::{AiConversationForCreate, AiTurn};

const MAX_PROMPT_LENGTH: usize = 8000;

/// Display name the assistant uses for its own turns.
pub const ASSISTANT_NAME: &str = "AI Assistant";

// region: --- Turns

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A prior conversation turn, normalized for the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: TurnRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: TurnRole::Assistant, content: content.into() }
    }
}

/// History item as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryTurn {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "isAI")]
    pub is_ai: Option<bool>,
}

impl HistoryTurn {
    pub fn role(&self) -> TurnRole {
        let named_assistant = matches!(
            self.role.as_deref(),
            Some("assistant") | Some(ASSISTANT_NAME)
        );
        if self.is_ai == Some(true) || named_assistant {
            TurnRole::Assistant
        } else {
            TurnRole::User
        }
    }
}

impl From<HistoryTurn> for ChatTurn {
    fn from(turn: HistoryTurn) -> Self {
        ChatTurn {
            role: turn.role(),
            content: turn.content,
        }
    }
}

// endregion: --- Turns

// region: --- Chat

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

/// Validated chat input: the new message plus normalized history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub message: String,
    pub history: Vec<ChatTurn>,
}

impl Validate for AiChatRequest {
    type Output = ChatPrompt;

    fn validate(self) -> Result<ChatPrompt, ValidationError> {
        if self.message.trim().is_empty() {
            return Err(ValidationError::new("message", "Message is required"));
        }
        check("message", validate_max_length(&self.message, MAX_PROMPT_LENGTH, "message"))?;

        for (i, turn) in self.history.iter().enumerate() {
            if turn.content.trim().is_empty() {
                return Err(ValidationError::new(
                    format!("history[{}].content", i),
                    "History content is required",
                ));
            }
        }

        Ok(ChatPrompt {
            message: self.message,
            history: self.history.into_iter().map(ChatTurn::from).collect(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiChatResponse {
    pub message: String,
}

// endregion: --- Chat

// region: --- Text analysis

/// Body of `/api/ai/sentiment` and `/api/ai/summarize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

impl Validate for TextRequest {
    type Output = String;

    fn validate(self) -> Result<String, ValidationError> {
        check("text", validate_not_empty(&self.text, "text"))?;
        check("text", validate_max_length(&self.text, MAX_PROMPT_LENGTH, "text"))?;
        Ok(self.text)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SentimentResponse {
    pub rating: u8,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    pub summary: String,
}

// endregion: --- Text analysis

// region: --- Conversations

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAiConversationRequest {
    pub user_id: String,
    #[serde(default)]
    pub messages: Vec<AiTurn>,
}

impl Validate for CreateAiConversationRequest {
    type Output = AiConversationForCreate;

    fn validate(self) -> Result<AiConversationForCreate, ValidationError> {
        check("userId", validate_not_empty(&self.user_id, "userId"))?;
        if let Some(i) = self.messages.iter().position(|m| m.role.trim().is_empty()) {
            return Err(ValidationError::new(
                format!("messages[{}].role", i),
                "role cannot be empty",
            ));
        }

        Ok(AiConversationForCreate {
            user_id: self.user_id,
            messages: self.messages,
            created_at: None,
        })
    }
}

// endregion: --- Conversations

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_roles() {
        let req: AiChatRequest = serde_json::from_value(json!({
            "message": "hello",
            "history": [
                {"id": "1", "content": "Hi!", "isAI": true, "timestamp": "2025-01-01T00:00:00Z"},
                {"role": "AI Assistant", "content": "How can I help?"},
                {"role": "assistant", "content": "Anything else?"},
                {"role": "Patient", "content": "My head hurts"},
                {"content": "no role at all", "isAI": false}
            ]
        }))
        .unwrap();

        let prompt = req.validate().unwrap();
        let roles: Vec<TurnRole> = prompt.history.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                TurnRole::Assistant,
                TurnRole::Assistant,
                TurnRole::Assistant,
                TurnRole::User,
                TurnRole::User
            ]
        );
    }

    #[test]
    fn test_blank_history_content_rejected() {
        let req: AiChatRequest = serde_json::from_value(json!({
            "message": "hello",
            "history": [
                {"content": "Hi!", "isAI": true},
                {"role": "user"}
            ]
        }))
        .unwrap();

        let err = req.validate().unwrap_err();
        assert_eq!(err.field, "history[1].content");
    }

    #[test]
    fn test_missing_message_rejected() {
        let req: AiChatRequest = serde_json::from_value(json!({"history": []})).unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.field, "message");
        assert_eq!(err.message, "Message is required");
    }

    #[test]
    fn test_history_defaults_to_empty() {
        let req: AiChatRequest = serde_json::from_value(json!({"message": "hi"})).unwrap();
        assert!(req.validate().unwrap().history.is_empty());
    }

    #[test]
    fn test_conversation_requires_roles() {
        let req: CreateAiConversationRequest = serde_json::from_value(json!({
            "userId": "u1",
            "messages": [{"role": "user", "content": "a"}, {"role": " ", "content": "b"}]
        }))
        .unwrap();
        assert_eq!(req.validate().unwrap_err().field, "messages[1].role");
    }
}
