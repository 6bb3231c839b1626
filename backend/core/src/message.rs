use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inbound envelope for one chat message. Nothing outlives the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub request_id: Uuid,
    pub chat_id: i64,
}

impl ChatRequest {
    pub fn new(chat_id: i64) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            chat_id,
        }
    }
}

/// Which branch of the message flow produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Usage,
    Prediction,
    InsufficientEvidence,
    ProcessingError,
}

/// Outbound envelope. The text is HTML-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub chat_id: i64,
    pub kind: ReplyKind,
    pub text: String,
}

impl ChatReply {
    pub fn new(request: &ChatRequest, kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            chat_id: request.chat_id,
            kind,
            text: text.into(),
        }
    }
}
