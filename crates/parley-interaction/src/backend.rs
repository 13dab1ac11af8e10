//! Answering-service backend interface and HTTP implementation.
//!
//! The dispatcher talks to the backend through the [`AnswerBackend`] trait
//! so controller logic can be exercised against a mock. The production
//! implementation, [`HttpAnswerBackend`], speaks the service's two-endpoint
//! HTTP surface: a JSON ask endpoint and a multipart upload endpoint.

use async_trait::async_trait;
use parley_core::config::ControllerConfig;
use parley_core::conversation::AnswerPayload;
use reqwest::Client;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const ASK_TIMEOUT: Duration = Duration::from_secs(30);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Classified failure of a backend operation.
///
/// Every variant is non-fatal to the controller: the dispatcher converts
/// them into history messages instead of propagating them, and the session
/// remains usable afterward.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request reached the backend, which answered with a non-success
    /// status and a detail text.
    #[error("server returned {status}: {detail}")]
    Server { status: u16, detail: String },

    /// The request was sent but no response arrived (connectivity, backend
    /// unreachable, timeout).
    #[error("no response from backend: {0}")]
    Transport(String),

    /// The request could not be constructed, or its successful response
    /// could not be decoded.
    #[error("{0}")]
    Request(String),
}

/// Outbound ask request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's query text.
    pub query: String,
    /// The guest identifier, attached only for guest sessions.
    #[serde(rename = "guestId", default, skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<String>,
}

/// A file handed over by the view layer for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// Display name of the file, also sent as the multipart file name.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Upload confirmation returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Human-readable confirmation text.
    pub message: String,
}

/// An abstract answering-service backend.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Submits a query and returns the structured answer.
    async fn ask(&self, request: AskRequest) -> Result<AnswerPayload, BackendError>;

    /// Uploads a file and returns the service's confirmation.
    async fn upload(&self, file: FilePayload) -> Result<UploadReceipt, BackendError>;
}

/// Error body shape the service returns on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Backend implementation over the service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpAnswerBackend {
    client: Client,
    ask_endpoint: String,
    upload_endpoint: String,
}

impl HttpAnswerBackend {
    pub fn new(ask_endpoint: impl Into<String>, upload_endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            ask_endpoint: ask_endpoint.into(),
            upload_endpoint: upload_endpoint.into(),
        }
    }

    /// Builds a backend from the controller configuration's endpoints.
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(&config.ask_endpoint, &config.upload_endpoint)
    }

    /// Maps a reqwest send failure onto the dispatch taxonomy: builder
    /// problems never left the process, everything else died in transit.
    fn classify_send_error(err: reqwest::Error) -> BackendError {
        if err.is_builder() {
            BackendError::Request(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }

    /// Extracts the `detail` field from an error response body, falling
    /// back to a generic text when the body is absent or malformed.
    async fn error_detail(response: reqwest::Response) -> String {
        response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[async_trait]
impl AnswerBackend for HttpAnswerBackend {
    async fn ask(&self, request: AskRequest) -> Result<AnswerPayload, BackendError> {
        tracing::debug!(query = %request.query, "Sending query to backend");

        let response = self
            .client
            .post(&self.ask_endpoint)
            .json(&request)
            .timeout(ASK_TIMEOUT)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = Self::error_detail(response).await;
            return Err(BackendError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<AnswerPayload>()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))
    }

    async fn upload(&self, file: FilePayload) -> Result<UploadReceipt, BackendError> {
        tracing::debug!(file = %file.file_name, "Uploading file to backend");

        let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(mime.essence_str())
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_endpoint)
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = Self::error_detail(response).await;
            return Err(BackendError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<UploadReceipt>()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))
    }
}
