//! Request dispatch and controller state synchronization.
//!
//! `RequestDispatcher` owns every mutation of conversation state: it
//! appends the optimistic and terminal messages, gates send/upload behind
//! the single in-flight [`Activity`] state, converts classified backend
//! failures into history messages, and keeps the citation panel in sync
//! with the latest answer. The view layer only reads snapshots and issues
//! intents.

use crate::backend::{AnswerBackend, AskRequest, BackendError, FilePayload};
use parley_core::config::ControllerConfig;
use parley_core::conversation::{
    Activity, AnswerPayload, Citation, CitationPanel, ConversationMessage, ConversationStore,
};
use parley_core::identity::Session;
use parley_core::view::ViewEffects;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Summary of a completed ask exchange, handed to the thread observer so an
/// embedding application can keep thread metadata (last message, counts)
/// current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadUpdate {
    /// The query that completed the exchange.
    pub last_message: String,
    /// Number of messages the exchange appended (user + assistant).
    pub message_count_delta: usize,
}

/// Callback invoked after each fully successful ask exchange.
pub type ThreadObserver = Arc<dyn Fn(ThreadUpdate) + Send + Sync>;

/// Dispatches outbound operations and synchronizes derived state.
///
/// All fields are mutated by this single writer only; the state lives
/// behind `RwLock`s so the view layer can read consistent snapshots while
/// an operation is in flight. No lock is held across an `.await` of the
/// backend, which is what keeps `toggle_panel` and `update_input` freely
/// available during a pending operation.
pub struct RequestDispatcher {
    config: ControllerConfig,
    session: Session,
    store: RwLock<ConversationStore>,
    panel: RwLock<CitationPanel>,
    activity: RwLock<Activity>,
    input: RwLock<String>,
    backend: Arc<dyn AnswerBackend>,
    effects: Arc<dyn ViewEffects>,
    thread_observer: RwLock<Option<ThreadObserver>>,
    closed: AtomicBool,
}

impl RequestDispatcher {
    /// Creates a dispatcher for one controller lifetime.
    ///
    /// # Arguments
    ///
    /// * `config` - Unified controller configuration
    /// * `session` - The resolved identity; created once, never replaced
    /// * `backend` - The answering-service backend
    /// * `effects` - View-side effects (scroll, file-selection reset)
    pub fn new(
        config: ControllerConfig,
        session: Session,
        backend: Arc<dyn AnswerBackend>,
        effects: Arc<dyn ViewEffects>,
    ) -> Self {
        let started = config.start_in_conversation;
        Self {
            config,
            session,
            store: RwLock::new(ConversationStore::new(started)),
            panel: RwLock::new(CitationPanel::new()),
            activity: RwLock::new(Activity::Idle),
            input: RwLock::new(String::new()),
            backend,
            effects,
            thread_observer: RwLock::new(None),
            closed: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn messages(&self) -> Vec<ConversationMessage> {
        self.store.read().await.messages().to_vec()
    }

    pub async fn message_count(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_started(&self) -> bool {
        self.store.read().await.is_started()
    }

    pub async fn activity(&self) -> Activity {
        *self.activity.read().await
    }

    pub async fn citations(&self) -> Vec<Citation> {
        self.panel.read().await.citations().to_vec()
    }

    pub async fn is_panel_open(&self) -> bool {
        self.panel.read().await.is_open()
    }

    pub async fn input(&self) -> String {
        self.input.read().await.clone()
    }

    /// Registers the thread observer (replacing any previous one).
    pub async fn set_thread_observer(&self, observer: ThreadObserver) {
        *self.thread_observer.write().await = Some(observer);
    }

    /// Edits the input buffer. Accepted freely, including while an
    /// operation is in flight.
    pub async fn update_input(&self, text: impl Into<String>) {
        *self.input.write().await = text.into();
    }

    /// User-initiated panel visibility toggle. Accepted freely, including
    /// while an operation is in flight.
    pub async fn toggle_panel(&self) {
        self.panel.write().await.toggle();
    }

    /// Installs a citation set directly, without issuing any request. The
    /// replacement is wholesale and the auto-open rule applies.
    pub async fn set_citations(&self, citations: Vec<Citation>) {
        self.panel.write().await.install(citations);
    }

    /// Marks the controller as torn down. Completions of in-flight
    /// operations arriving afterward become safe no-ops instead of
    /// mutating a dead instance.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Applies the configured context-change policy: clears history,
    /// re-seeds the started latch, and drops the citation panel. Without
    /// `reset_on_context_change` this is a no-op.
    pub async fn switch_thread(&self) {
        if !self.config.reset_on_context_change {
            return;
        }
        self.store
            .write()
            .await
            .clear(self.config.start_in_conversation);
        self.panel.write().await.clear();
        tracing::debug!("Conversation state reset for new thread context");
    }

    /// Atomically claims the in-flight slot. Returns false when another
    /// operation is already pending.
    async fn try_begin(&self, next: Activity) -> bool {
        let mut activity = self.activity.write().await;
        if !activity.is_idle() {
            return false;
        }
        *activity = next;
        true
    }

    async fn finish(&self) {
        *self.activity.write().await = Activity::Idle;
    }

    async fn append(&self, message: ConversationMessage) {
        self.store.write().await.append(message);
        self.effects.scroll_to_latest();
    }

    /// Submits a query to the answering service.
    ///
    /// Silent no-op when the trimmed query is empty or another operation
    /// is pending: no message is appended and no request is issued. The
    /// optimistic user message is appended synchronously before any
    /// network activity; exactly one terminal assistant message follows
    /// the single resolution of the request, and the in-flight state is
    /// released on success and failure alike.
    pub async fn send_query(&self, query: &str) {
        if query.trim().is_empty() {
            return;
        }
        if !self.try_begin(Activity::Sending).await {
            tracing::debug!("Ignoring query while an operation is in flight");
            return;
        }

        {
            let mut store = self.store.write().await;
            if !store.is_started() {
                store.mark_started();
            }
            store.append(ConversationMessage::user(query));
        }
        self.effects.scroll_to_latest();
        self.input.write().await.clear();

        let request = AskRequest {
            query: query.to_string(),
            guest_id: if self.session.is_guest {
                self.session.guest_id.clone()
            } else {
                None
            },
        };

        let result = self.backend.ask(request).await;
        if self.is_closed() {
            // Torn down while in flight: drop the completion.
            return;
        }

        match result {
            Ok(payload) => {
                let citations = payload.citations.clone();
                self.append(ConversationMessage::assistant(payload)).await;
                if !citations.is_empty() {
                    self.panel.write().await.install(citations);
                }
                let observer = self.thread_observer.read().await.clone();
                if let Some(observer) = observer {
                    observer(ThreadUpdate {
                        last_message: query.to_string(),
                        message_count_delta: 2,
                    });
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Ask request failed");
                let text = describe_ask_failure(&err);
                self.append(ConversationMessage::assistant(AnswerPayload::answer(text)))
                    .await;
            }
        }

        self.finish().await;
    }

    /// Uploads a file to the answering service.
    ///
    /// Silent no-op when another operation is pending. The announcement
    /// message is appended before any network activity; exactly one
    /// terminal system message follows. The in-flight state is released
    /// and the file selection cleared on success and failure alike, so
    /// the same file can be re-selected immediately.
    pub async fn upload_file(&self, file: FilePayload) {
        if !self.try_begin(Activity::Uploading).await {
            tracing::debug!(file = %file.file_name, "Ignoring upload while an operation is in flight");
            return;
        }

        {
            let mut store = self.store.write().await;
            if !store.is_started() {
                store.mark_started();
            }
            store.append(ConversationMessage::system(format!(
                "Uploading {}...",
                file.file_name
            )));
        }
        self.effects.scroll_to_latest();

        let file_name = file.file_name.clone();
        let result = self.backend.upload(file).await;
        if self.is_closed() {
            return;
        }

        match result {
            Ok(receipt) => {
                self.append(ConversationMessage::system(format!("✅ {}", receipt.message)))
                    .await;
            }
            Err(err) => {
                tracing::warn!(error = %err, file = %file_name, "Upload failed");
                self.append(ConversationMessage::system(format!(
                    "❌ Error uploading {}.",
                    file_name
                )))
                .await;
            }
        }

        self.finish().await;
        self.effects.clear_file_selection();
    }
}

/// Human-readable text for a classified ask failure.
fn describe_ask_failure(err: &BackendError) -> String {
    match err {
        BackendError::Server { detail, .. } => format!("Server error: {detail}"),
        BackendError::Transport(_) => {
            "Connection issue. Please ensure the backend is running.".to_string()
        }
        BackendError::Request(description) => description.clone(),
    }
}
