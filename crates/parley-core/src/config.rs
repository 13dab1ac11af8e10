//! Controller configuration.
//!
//! Two deployment variants of the original client existed (different backend
//! base URLs, guest-session handling, and context-reset behavior). They are
//! unified behind a single explicit configuration object so there is one
//! state machine, parameterized, instead of two parallel ones.

use serde::{Deserialize, Serialize};

/// Configuration for the conversation controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Endpoint receiving ask requests.
    pub ask_endpoint: String,
    /// Endpoint receiving multipart file uploads.
    pub upload_endpoint: String,
    /// Resolve and attach a device-persisted guest identity when no
    /// authenticated identity exists.
    pub enable_guest_sessions: bool,
    /// Clear conversation state when the active thread context changes.
    pub reset_on_context_change: bool,
    /// Initial value of the conversation-started latch, also applied on
    /// thread reset.
    pub start_in_conversation: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            ask_endpoint: "http://localhost:8000/api/ask".to_string(),
            upload_endpoint: "http://localhost:8000/api/upload".to_string(),
            enable_guest_sessions: true,
            reset_on_context_change: true,
            start_in_conversation: false,
        }
    }
}
