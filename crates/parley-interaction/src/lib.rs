//! Outbound request dispatch for the Parley conversation controller.
//!
//! # Module Structure
//!
//! - `backend`: The answering-service seam (`AnswerBackend`), the HTTP
//!   implementation, and the classified `BackendError` taxonomy
//! - `dispatcher`: `RequestDispatcher`, owner of all conversation-state
//!   mutation

mod backend;
mod dispatcher;

pub use backend::{
    AnswerBackend, AskRequest, BackendError, FilePayload, HttpAnswerBackend, UploadReceipt,
};
pub use dispatcher::{RequestDispatcher, ThreadObserver, ThreadUpdate};
