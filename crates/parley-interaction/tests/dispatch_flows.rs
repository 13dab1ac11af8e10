//! End-to-end controller flows against a scripted backend.

use async_trait::async_trait;
use parley_core::config::ControllerConfig;
use parley_core::conversation::{Activity, AnswerPayload, Citation, MessageContent, MessageRole};
use parley_core::identity::Session;
use parley_core::view::NullViewEffects;
use parley_interaction::{
    AnswerBackend, AskRequest, BackendError, FilePayload, RequestDispatcher, UploadReceipt,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Backend that replays a script of canned results.
struct ScriptedBackend {
    ask_results: Mutex<VecDeque<Result<AnswerPayload, BackendError>>>,
    upload_results: Mutex<VecDeque<Result<UploadReceipt, BackendError>>>,
}

impl ScriptedBackend {
    fn new() -> Self {
        Self {
            ask_results: Mutex::new(VecDeque::new()),
            upload_results: Mutex::new(VecDeque::new()),
        }
    }

    fn ask(self, result: Result<AnswerPayload, BackendError>) -> Self {
        self.ask_results.lock().unwrap().push_back(result);
        self
    }

    fn upload(self, result: Result<UploadReceipt, BackendError>) -> Self {
        self.upload_results.lock().unwrap().push_back(result);
        self
    }
}

#[async_trait]
impl AnswerBackend for ScriptedBackend {
    async fn ask(&self, _request: AskRequest) -> Result<AnswerPayload, BackendError> {
        self.ask_results
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted ask")
    }

    async fn upload(&self, _file: FilePayload) -> Result<UploadReceipt, BackendError> {
        self.upload_results
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted upload")
    }
}

fn dispatcher(backend: ScriptedBackend) -> RequestDispatcher {
    RequestDispatcher::new(
        ControllerConfig::default(),
        Session::guest("guest-e2e"),
        Arc::new(backend),
        Arc::new(NullViewEffects),
    )
}

#[tokio::test]
async fn plain_answer_exchange_leaves_panel_closed() {
    let dispatcher = dispatcher(ScriptedBackend::new().ask(Ok(AnswerPayload {
        text: "hi there".to_string(),
        citations: Vec::new(),
        kind: None,
    })));

    dispatcher.send_query("hello").await;

    let messages = dispatcher.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].content, MessageContent::Text("hello".to_string()));
    assert_eq!(messages[1].role, MessageRole::Assistant);
    assert_eq!(messages[1].content.text(), "hi there");
    assert!(!dispatcher.is_panel_open().await);
}

#[tokio::test]
async fn cited_answer_installs_citations_and_opens_panel() {
    let dispatcher = dispatcher(ScriptedBackend::new().ask(Ok(AnswerPayload {
        text: "here".to_string(),
        citations: vec![Citation(json!({"id": 1}))],
        kind: None,
    })));

    dispatcher.send_query("find docs").await;

    assert_eq!(dispatcher.citations().await, vec![Citation(json!({"id": 1}))]);
    assert!(dispatcher.is_panel_open().await);
}

#[tokio::test]
async fn failed_upload_announces_then_reports_and_goes_idle() {
    let dispatcher = dispatcher(
        ScriptedBackend::new().upload(Err(BackendError::Transport("unreachable".to_string()))),
    );

    dispatcher
        .upload_file(FilePayload::new("report.pdf", vec![1, 2, 3]))
        .await;

    let messages = dispatcher.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content.text(), "Uploading report.pdf...");
    assert!(messages[1].content.text().contains("Error uploading report.pdf."));
    assert_eq!(dispatcher.activity().await, Activity::Idle);
}

#[tokio::test]
async fn rejected_ask_grows_history_by_exactly_two() {
    let dispatcher = dispatcher(ScriptedBackend::new().ask(Err(BackendError::Server {
        status: 429,
        detail: "rate limited".to_string(),
    })));

    dispatcher.send_query("hello").await;

    let messages = dispatcher.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, MessageRole::Assistant);
    assert!(messages[1].content.text().contains("rate limited"));
}
