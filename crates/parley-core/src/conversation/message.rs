//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including roles, content variants, and the structured answer payload
//! returned by the answering service.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message (upload progress, notices).
    System,
}

/// A structured source reference returned alongside an answer.
///
/// Citations are opaque to the controller: stored, displayed, and replaced
/// as atomic units, never inspected or merged field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Citation(pub serde_json::Value);

/// Structured answer payload returned by the answering service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    /// The answer text.
    pub text: String,
    /// Ordered source references backing the answer, possibly empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    /// Semantic type tag (e.g. "answer"), when the service provides one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl AnswerPayload {
    /// A citation-free payload tagged as a plain answer.
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
            kind: Some("answer".to_string()),
        }
    }
}

/// Message content: plain text or a structured answer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// Structured answer payload from the backend.
    Answer(AnswerPayload),
}

impl MessageContent {
    /// The displayable text of this content.
    pub fn text(&self) -> &str {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Answer(payload) => &payload.text,
        }
    }
}

/// A single message in a conversation history.
///
/// Messages are immutable once appended: the history never reorders,
/// edits, or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: MessageContent,
    /// Timestamp when the message was created (RFC 3339).
    pub timestamp: String,
}

impl ConversationMessage {
    fn new(role: MessageRole, content: MessageContent) -> Self {
        Self {
            role,
            content,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// A user-authored plain-text message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, MessageContent::Text(text.into()))
    }

    /// An assistant message carrying a full answer payload.
    pub fn assistant(payload: AnswerPayload) -> Self {
        Self::new(MessageRole::Assistant, MessageContent::Answer(payload))
    }

    /// A system notice.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageRole::System, MessageContent::Text(text.into()))
    }
}
