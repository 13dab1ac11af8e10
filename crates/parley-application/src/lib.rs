//! Application layer: composes the conversation controller for a view
//! layer to consume.
//!
//! `ViewCoordinator` is deliberately thin. It resolves the session identity
//! once, wires the dispatcher together, exposes the composed state as a
//! [`ViewSnapshot`], and forwards each view intent 1:1 to the matching
//! controller operation. All business logic lives below it.

use parley_core::config::ControllerConfig;
use parley_core::conversation::{Activity, Citation, ConversationMessage};
use parley_core::error::Result;
use parley_core::identity::{IdentityProvider, Session};
use parley_core::storage::KeyValueStore;
use parley_core::view::ViewEffects;
use parley_interaction::{AnswerBackend, FilePayload, RequestDispatcher, ThreadObserver};
use serde::Serialize;
use std::sync::Arc;

/// Citation panel portion of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    /// Displayed citations, in backend order.
    pub citations: Vec<Citation>,
    /// Whether the panel is visible.
    pub open: bool,
}

/// The externally observable controller state at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    /// The resolved identity for this controller lifetime.
    pub session: Session,
    /// Whether the conversation has started (view-transition state).
    pub started: bool,
    /// The full message history, oldest first.
    pub messages: Vec<ConversationMessage>,
    /// The in-flight operation state (the view's loading indicator).
    pub activity: Activity,
    /// Citation panel state.
    pub panel: PanelSnapshot,
    /// The current input buffer.
    pub input: String,
}

/// Coordinates between the view layer and the conversation controller.
pub struct ViewCoordinator {
    dispatcher: Arc<RequestDispatcher>,
}

impl ViewCoordinator {
    /// Resolves the session identity and assembles the controller.
    ///
    /// When guest sessions are disabled by configuration, the device store
    /// is not consulted and the session is authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if guest-identity resolution fails (device storage
    /// unreadable/unwritable).
    pub async fn initialize(
        config: ControllerConfig,
        backend: Arc<dyn AnswerBackend>,
        effects: Arc<dyn ViewEffects>,
        device_store: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let session = if config.enable_guest_sessions {
            IdentityProvider::new(device_store).resolve().await?
        } else {
            Session::authenticated()
        };

        Ok(Self {
            dispatcher: Arc::new(RequestDispatcher::new(config, session, backend, effects)),
        })
    }

    /// Wraps an already assembled dispatcher.
    pub fn with_dispatcher(dispatcher: Arc<RequestDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The composed state snapshot for rendering.
    pub async fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            session: self.dispatcher.session().clone(),
            started: self.dispatcher.is_started().await,
            messages: self.dispatcher.messages().await,
            activity: self.dispatcher.activity().await,
            panel: PanelSnapshot {
                citations: self.dispatcher.citations().await,
                open: self.dispatcher.is_panel_open().await,
            },
            input: self.dispatcher.input().await,
        }
    }

    /// View intent: submit the given query text.
    pub async fn submit_query(&self, text: &str) {
        self.dispatcher.send_query(text).await;
    }

    /// View intent: the user picked a file for upload.
    pub async fn select_file(&self, file: FilePayload) {
        self.dispatcher.upload_file(file).await;
    }

    /// View intent: toggle citation panel visibility.
    pub async fn toggle_panel(&self) {
        self.dispatcher.toggle_panel().await;
    }

    /// View intent: edit the input buffer.
    pub async fn update_input(&self, text: impl Into<String>) {
        self.dispatcher.update_input(text).await;
    }

    /// View intent: install a citation set directly (no request issued).
    pub async fn set_citations(&self, citations: Vec<Citation>) {
        self.dispatcher.set_citations(citations).await;
    }

    /// View intent: the active thread context changed.
    pub async fn switch_thread(&self) {
        self.dispatcher.switch_thread().await;
    }

    /// Registers the thread observer.
    pub async fn set_thread_observer(&self, observer: ThreadObserver) {
        self.dispatcher.set_thread_observer(observer).await;
    }

    /// Tears the controller down; in-flight completions become no-ops.
    pub fn close(&self) {
        self.dispatcher.close();
    }
}
