//! # Relay Frames
//!
//! Every frame on the relay is a JSON object with a string `type`. Only
//! `chat_message` is acted on today; other types are accepted and ignored.

use serde_json::Value;
use thiserror::Error;

pub const CHAT_MESSAGE: &str = "chat_message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    /// Fan out to every other connection
    Chat,
    /// Well-formed but not handled
    Other(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame is not valid JSON: {0}")]
    NotJson(String),

    #[error("frame is not a JSON object")]
    NotObject,

    #[error("frame has no string `type` field")]
    MissingType,
}

pub fn classify(payload: &str) -> Result<FrameKind, FrameError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| FrameError::NotJson(e.to_string()))?;
    let object = value.as_object().ok_or(FrameError::NotObject)?;
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(FrameError::MissingType)?;

    Ok(match kind {
        CHAT_MESSAGE => FrameKind::Chat,
        other => FrameKind::Other(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            classify(r#"{"type":"chat_message","message":{"message":"hi"}}"#),
            Ok(FrameKind::Chat)
        );
        assert_eq!(
            classify(r#"{"type":"typing"}"#),
            Ok(FrameKind::Other("typing".into()))
        );
    }

    #[test]
    fn test_classify_malformed() {
        assert!(matches!(classify("{not json"), Err(FrameError::NotJson(_))));
        assert_eq!(classify(r#"["chat_message"]"#), Err(FrameError::NotObject));
        assert_eq!(classify(r#"{"kind":"chat_message"}"#), Err(FrameError::MissingType));
        assert_eq!(classify(r#"{"type":42}"#), Err(FrameError::MissingType));
    }
}
