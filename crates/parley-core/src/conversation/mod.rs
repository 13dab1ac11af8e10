//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: Message types (`MessageRole`, `MessageContent`,
//!   `AnswerPayload`, `Citation`)
//! - `store`: Append-only history and the conversation-started latch
//! - `panel`: Citation panel state and its visibility rule
//! - `activity`: The single in-flight operation state

mod activity;
mod message;
mod panel;
mod store;

// Re-export public API
pub use activity::Activity;
pub use message::{AnswerPayload, Citation, ConversationMessage, MessageContent, MessageRole};
pub use panel::CitationPanel;
pub use store::ConversationStore;
